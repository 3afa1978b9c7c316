//! Retrieval port for merged pull requests.

use crate::import::domain::{MergedPullRequest, RepositorySource};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for pull request retrieval.
pub type PullRequestSourceResult<T> = Result<T, PullRequestSourceError>;

/// Source of merged pull requests for a repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// Fetches merged pull requests for the repository, up to the adapter's
    /// fixed cap.
    ///
    /// A tool that ran but reported failure yields an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns [`PullRequestSourceError`] when the tool cannot be started,
    /// exceeds its time budget, or produces output that cannot be decoded.
    async fn fetch_merged(
        &self,
        source: &RepositorySource,
    ) -> PullRequestSourceResult<Vec<MergedPullRequest>>;
}

/// Errors returned by pull request sources.
#[derive(Debug, Clone, Error)]
pub enum PullRequestSourceError {
    /// The query tool could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The query tool did not finish within its time budget.
    #[error("{program} timed out after {}s", .timeout.as_secs())]
    TimedOut {
        /// Program that timed out.
        program: String,
        /// Configured timeout.
        timeout: Duration,
    },

    /// The query tool output could not be decoded.
    #[error("malformed pull request listing: {0}")]
    Decode(String),
}
