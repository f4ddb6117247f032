//! Report formatting and printing utilities.
//!
//! Issues are shown in cargo-style format. Kept apart from the commands so
//! the library can be used without any terminal output.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CheckSummary, CommandResult, CommandSummary, InitSummary, ShowSummary};
use crate::core::TextOrigin;
use crate::issues::{Issue, Report, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult) {
    let mut out = io::stdout().lock();
    print_to(result, &mut out);
}

pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Check(summary) => {
            if result.issues.is_empty() {
                print_success(summary, writer);
            } else {
                report_to(&result.issues, writer);
            }
        }
        CommandSummary::Show(summary) => print_table(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

/// Print issues, in the order given, followed by a summary line.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let max_line_width = issues
        .iter()
        .filter_map(|i| i.location().line)
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1);

    for issue in issues {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(issues, writer);
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Clickable location: --> path[:line]
    let loc = issue.location();
    match loc.line {
        Some(line) => {
            let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), loc.file_path, line);
        }
        None => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), loc.file_path);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn print_success<W: Write>(summary: &CheckSummary, writer: &mut W) {
    let msg = format!(
        "Checked {} {}, {} bundle {} - no issues found",
        summary.catalogs_checked,
        if summary.catalogs_checked == 1 {
            "catalog"
        } else {
            "catalogs"
        },
        summary.bundle_files_checked,
        if summary.bundle_files_checked == 1 {
            "file"
        } else {
            "files"
        }
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

/// Bound table as `IDENTIFIER  text  [origin]`, columns aligned by display
/// width so wide scripts line up.
fn print_table<W: Write>(summary: &ShowSummary, writer: &mut W) {
    let table = &summary.table;
    let _ = writeln!(
        writer,
        "{} {}",
        table.catalog().base_name().bold(),
        format!("({})", table.chain()).dimmed()
    );
    for origin in &summary.origins {
        let _ = writeln!(writer, "  {} {}", "<--".blue(), origin);
    }
    let _ = writeln!(writer);

    let id_width = table
        .messages()
        .iter()
        .map(|m| UnicodeWidthStr::width(m.identifier.as_str()))
        .max()
        .unwrap_or(0);
    let text_width = table
        .messages()
        .iter()
        .map(|m| UnicodeWidthStr::width(m.text.as_str()))
        .max()
        .unwrap_or(0);

    for message in table.messages() {
        let id_pad = id_width - UnicodeWidthStr::width(message.identifier.as_str());
        let text_pad = text_width - UnicodeWidthStr::width(message.text.as_str());
        let origin = match &message.origin {
            TextOrigin::Bundle(_) => format!("[{}]", message.origin).dimmed(),
            TextOrigin::Sentinel => format!("[{}]", message.origin).red(),
        };
        let _ = writeln!(
            writer,
            "  {}{:id_pad$}  {}{:text_pad$}  {}",
            message.identifier,
            "",
            message.text,
            "",
            origin,
        );
    }

    let missing = table.missing().count();
    if missing > 0 {
        let _ = writeln!(
            writer,
            "\n{} {} of {} identifiers have no translation",
            FAILURE_MARK.red(),
            missing,
            table.len()
        );
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path.display()).green()
    );
}
