//! Issue types reported by `msgbind check`.
//!
//! Each issue is self-contained with everything the reporter needs to show
//! it: where it is, what it is, and how to fix it.

use enum_dispatch::enum_dispatch;

use crate::core::{LocaleChain, sentinel};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    BundleError,
    MissingTranslation,
    DuplicateKey,
    UnusedKey,
    OrphanBundle,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::BundleError => write!(f, "bundle-error"),
            Rule::MissingTranslation => write!(f, "missing-translation"),
            Rule::DuplicateKey => write!(f, "duplicate-key"),
            Rule::UnusedKey => write!(f, "unused-key"),
            Rule::OrphanBundle => write!(f, "orphan-bundle"),
        }
    }
}

/// Location of an issue in a bundle file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportLocation {
    pub file_path: String,
    /// Line number (1-indexed), when the issue points at an entry.
    pub line: Option<usize>,
}

impl ReportLocation {
    pub fn file(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            line: None,
        }
    }

    pub fn with_line(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line: Some(line),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// A catalog could not be bound at all for a locale (no bundle, unreadable
/// or malformed file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleErrorIssue {
    pub location: ReportLocation,
    pub catalog: String,
    pub error: String,
}

/// A declared identifier has no text anywhere in the locale chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTranslationIssue {
    /// The most specific existing bundle of the chain.
    pub location: ReportLocation,
    pub catalog: String,
    pub identifier: String,
    pub chain: LocaleChain,
    /// Strict mode reports this as an error.
    pub strict: bool,
}

/// A key defined twice in one bundle file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKeyIssue {
    pub location: ReportLocation,
    pub key: String,
    pub first_line: usize,
}

/// A bundle key no catalog declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedKeyIssue {
    pub location: ReportLocation,
    pub catalog: String,
    pub key: String,
}

/// A bundle file that belongs to no configured catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrphanBundleIssue {
    pub location: ReportLocation,
}

// ============================================================
// Issue Enum
// ============================================================

/// An issue found while checking catalogs against their bundles.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    BundleError(BundleErrorIssue),
    MissingTranslation(MissingTranslationIssue),
    DuplicateKey(DuplicateKeyIssue),
    UnusedKey(UnusedKeyIssue),
    OrphanBundle(OrphanBundleIssue),
}

impl Issue {
    /// Ordering key: file, line, rule, message.
    pub fn sort_key(&self) -> (ReportLocation, Rule, String) {
        (self.location().clone(), self.report_rule(), self.message())
    }
}

/// Trait for types that can be reported to CLI.
///
/// Uses `enum_dispatch` for zero-cost dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> &ReportLocation;

    /// Primary message to display (key or identifier, error text, ...).
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for BundleErrorIssue {
    fn location(&self) -> &ReportLocation {
        &self.location
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Severity::Error
    }

    fn report_rule(&self) -> Rule {
        Rule::BundleError
    }

    fn details(&self) -> Option<String> {
        Some(format!("while binding catalog {}", self.catalog))
    }
}

impl Report for MissingTranslationIssue {
    fn location(&self) -> &ReportLocation {
        &self.location
    }

    fn message(&self) -> String {
        self.identifier.clone()
    }

    fn report_severity(&self) -> Severity {
        if self.strict {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    fn report_rule(&self) -> Rule {
        Rule::MissingTranslation
    }

    fn hint(&self) -> Option<String> {
        Some(format!("add `{}=...` to this bundle", self.identifier))
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "no text in {}; bound to \"{}\"",
            self.chain,
            sentinel(&self.identifier)
        ))
    }
}

impl Report for DuplicateKeyIssue {
    fn location(&self) -> &ReportLocation {
        &self.location
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::DuplicateKey
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "first defined at line {}; the later definition is used",
            self.first_line
        ))
    }
}

impl Report for UnusedKeyIssue {
    fn location(&self) -> &ReportLocation {
        &self.location
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::UnusedKey
    }

    fn details(&self) -> Option<String> {
        Some(format!("not declared in catalog {}", self.catalog))
    }
}

impl Report for OrphanBundleIssue {
    fn location(&self) -> &ReportLocation {
        &self.location
    }

    fn message(&self) -> String {
        "bundle file is not used by any catalog".to_string()
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::OrphanBundle
    }

    fn hint(&self) -> Option<String> {
        Some("declare its base name under 'catalogs' or delete the file".to_string())
    }
}
