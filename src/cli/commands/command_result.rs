use std::{path::PathBuf, sync::Arc};

use super::super::exit_status::ExitStatus;
use crate::core::BoundMessageTable;
use crate::issues::{Issue, Report, Severity};

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Show(ShowSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CheckSummary {
    pub catalogs_checked: usize,
    /// Distinct (catalog, locale) binds performed.
    pub binds_checked: usize,
    /// Bundle files read from disk.
    pub bundle_files_checked: usize,
}

#[derive(Debug)]
pub struct ShowSummary {
    pub table: Arc<BoundMessageTable>,
    /// Bundle files the table was bound from, most specific first.
    pub origins: Vec<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

/// Result of running msgbind commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// Warnings fail the command too.
    pub strict: bool,
    /// All issues found, sorted by location. Empty for non-check commands.
    pub issues: Vec<Issue>,
}

impl CommandResult {
    pub fn new(summary: CommandSummary, mut issues: Vec<Issue>, strict: bool) -> Self {
        issues.sort_by_key(Issue::sort_key);
        let error_count = issues
            .iter()
            .filter(|i| i.report_severity() == Severity::Error)
            .count();
        let warning_count = issues.len() - error_count;
        Self {
            summary,
            error_count,
            warning_count,
            strict,
            issues,
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.error_count > 0 || (self.strict && self.warning_count > 0) {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
