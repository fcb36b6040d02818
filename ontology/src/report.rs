//! Generation report: recoverable issues and record counts.
//!
//! Issues never stop a run. They are collected per record while the
//! artifacts are still produced in full, and surfaced once the run is over.

use std::fmt;

/// How serious a recoverable issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Expected data gap; output is still meaningful.
    Warning,
    /// Data inconsistency; the affected record carries a placeholder.
    Error,
}

impl Severity {
    /// Short label for report output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "WARN",
            Severity::Error => "FAIL",
        }
    }
}

/// What went wrong for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// A textual relation target names no canonical pattern.
    UnresolvedReference,
    /// A numeric relation target names no paper pattern (or its paper is missing).
    DanglingNumericReference,
    /// A non top-level type has neither subcategory nor subsubcategory.
    MissingCategoryFallback,
    /// A paper pattern's name is not a known canonical name or alias.
    UnmappedExample,
    /// A paper pattern refers to a paper that does not exist.
    DanglingPaperReference,
}

impl IssueKind {
    /// Severity of this kind of issue.
    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            IssueKind::UnresolvedReference => Severity::Warning,
            IssueKind::DanglingNumericReference
            | IssueKind::MissingCategoryFallback
            | IssueKind::UnmappedExample
            | IssueKind::DanglingPaperReference => Severity::Error,
        }
    }

    /// Stable name used in report output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::UnresolvedReference => "unresolved-reference",
            IssueKind::DanglingNumericReference => "dangling-numeric-reference",
            IssueKind::MissingCategoryFallback => "missing-category",
            IssueKind::UnmappedExample => "unmapped-example",
            IssueKind::DanglingPaperReference => "dangling-paper-reference",
        }
    }
}

/// A single recoverable issue, attributed to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// What went wrong.
    pub kind: IssueKind,
    /// The affected record, e.g. `paper pattern 7 (Retry)`.
    pub record: String,
    /// Human-readable description.
    pub message: String,
    /// Optional additional detail lines.
    pub details: Vec<String>,
}

impl Issue {
    /// Creates an issue without details.
    pub fn new(kind: IssueKind, record: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            record: record.into(),
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Appends a detail line.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    /// Severity derived from the kind.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.severity().as_str(),
            self.kind.as_str(),
            self.record,
            self.message
        )
    }
}

/// Aggregated outcome of one generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Every recoverable issue, in processing order.
    pub issues: Vec<Issue>,
    /// Class records emitted.
    pub classes: usize,
    /// Canonical records emitted.
    pub canonicals: usize,
    /// Example records emitted.
    pub examples: usize,
    /// Relation lines emitted across all examples.
    pub relations: usize,
}

impl GenerationReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an issue.
    ///
    /// Issues are logged at debug level only; callers present the collected
    /// report themselves.
    pub fn push(&mut self, issue: Issue) {
        tracing::debug!(
            kind = issue.kind.as_str(),
            severity = issue.severity().as_str(),
            record = %issue.record,
            "{}",
            issue.message
        );
        self.issues.push(issue);
    }

    /// Number of issues with [`Severity::Error`].
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of issues with [`Severity::Warning`].
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Issues of one kind.
    pub fn of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }

    /// Returns true if no issue was recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == severity)
            .count()
    }
}
