//! Per-run import summary.

use super::RepositoryName;
use std::fmt;

const RULE_WIDTH: usize = 60;
const NAME_COLUMN_WIDTH: usize = 30;

/// Why a repository was not imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing exists at the configured path.
    PathNotFound,
    /// The configured path exists but is not a directory.
    NotADirectory,
    /// The path could not be opened.
    Inaccessible(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathNotFound => f.write_str("path not found"),
            Self::NotADirectory => f.write_str("path is not a directory"),
            Self::Inaccessible(message) => write!(f, "path not accessible: {message}"),
        }
    }
}

/// Outcome of importing a single repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryOutcome {
    /// The repository was not attempted.
    Skipped {
        /// Reason the repository was skipped.
        reason: SkipReason,
    },
    /// Retrieval and insertion completed.
    Imported {
        /// Merged pull requests returned by the query tool.
        discovered: usize,
        /// Tasks newly inserted during this run.
        imported: usize,
    },
    /// An error aborted the remaining work for this repository.
    Failed {
        /// Rendered error message.
        message: String,
    },
}

/// Summary line for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryReport {
    repository: RepositoryName,
    outcome: RepositoryOutcome,
}

impl RepositoryReport {
    /// Creates a report for a repository.
    #[must_use]
    pub const fn new(repository: RepositoryName, outcome: RepositoryOutcome) -> Self {
        Self {
            repository,
            outcome,
        }
    }

    /// Returns the repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Returns the recorded outcome.
    #[must_use]
    pub const fn outcome(&self) -> &RepositoryOutcome {
        &self.outcome
    }

    /// Pull requests discovered, zero unless the import completed.
    #[must_use]
    pub const fn discovered(&self) -> usize {
        match self.outcome {
            RepositoryOutcome::Imported { discovered, .. } => discovered,
            RepositoryOutcome::Skipped { .. } | RepositoryOutcome::Failed { .. } => 0,
        }
    }

    /// Tasks inserted, zero unless the import completed.
    #[must_use]
    pub const fn imported(&self) -> usize {
        match self.outcome {
            RepositoryOutcome::Imported { imported, .. } => imported,
            RepositoryOutcome::Skipped { .. } | RepositoryOutcome::Failed { .. } => 0,
        }
    }
}

impl fmt::Display for RepositoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.repository.as_str();
        match &self.outcome {
            RepositoryOutcome::Skipped { reason } => {
                write!(f, "   {name:<NAME_COLUMN_WIDTH$} ({reason})")
            }
            RepositoryOutcome::Failed { message } => {
                write!(f, "   {name:<NAME_COLUMN_WIDTH$} error: {message}")
            }
            RepositoryOutcome::Imported {
                discovered,
                imported,
            } => write!(
                f,
                "   {name:<NAME_COLUMN_WIDTH$} {discovered} PRs ({imported} new)"
            ),
        }
    }
}

/// Ordered reports for every configured repository in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    reports: Vec<RepositoryReport>,
}

impl ImportSummary {
    /// Creates an empty summary.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reports: Vec::new(),
        }
    }

    /// Appends a repository report.
    pub fn record(&mut self, report: RepositoryReport) {
        self.reports.push(report);
    }

    /// Returns reports in processing order.
    #[must_use]
    pub fn reports(&self) -> &[RepositoryReport] {
        &self.reports
    }

    /// Sum of discovered pull requests across completed repositories.
    #[must_use]
    pub fn total_discovered(&self) -> usize {
        self.reports.iter().map(RepositoryReport::discovered).sum()
    }

    /// Sum of newly inserted tasks across completed repositories.
    #[must_use]
    pub fn total_imported(&self) -> usize {
        self.reports.iter().map(RepositoryReport::imported).sum()
    }

    /// Number of repositories that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| matches!(report.outcome(), RepositoryOutcome::Failed { .. }))
            .count()
    }

    /// Number of repositories that were skipped.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| matches!(report.outcome(), RepositoryOutcome::Skipped { .. }))
            .count()
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "─".repeat(RULE_WIDTH);
        writeln!(f, "Import summary")?;
        writeln!(f, "{rule}")?;
        for report in &self.reports {
            writeln!(f, "{report}")?;
        }
        writeln!(f, "{rule}")?;
        write!(
            f,
            "   Total: {} PRs, {} new tasks",
            self.total_discovered(),
            self.total_imported()
        )
    }
}
