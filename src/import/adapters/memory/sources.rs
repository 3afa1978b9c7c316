//! Scripted pull request source and workspace probe.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::import::{
    domain::{MergedPullRequest, RepositorySource},
    ports::{
        PathStatus, PullRequestSource, PullRequestSourceError, PullRequestSourceResult,
        WorkspaceProbe,
    },
};

type ScriptedListing = Result<Vec<MergedPullRequest>, PullRequestSourceError>;

/// Pull request source that replays scripted listings keyed by `owner/name`.
///
/// Repositories without a script return an empty listing. Every fetch is
/// recorded so callers can assert which repositories were attempted.
#[derive(Debug, Clone, Default)]
pub struct StaticPullRequestSource {
    state: Arc<RwLock<StaticSourceState>>,
}

#[derive(Debug, Default)]
struct StaticSourceState {
    listings: HashMap<String, ScriptedListing>,
    fetched: Vec<String>,
}

impl StaticPullRequestSource {
    /// Creates a source with no scripted listings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the listing returned for a repository, replacing any previous
    /// script.
    pub fn set_listing(&self, full_name: impl Into<String>, listing: Vec<MergedPullRequest>) {
        self.write_state(|state| {
            state.listings.insert(full_name.into(), Ok(listing));
        });
    }

    /// Scripts a retrieval failure for a repository.
    pub fn set_failure(&self, full_name: impl Into<String>, error: PullRequestSourceError) {
        self.write_state(|state| {
            state.listings.insert(full_name.into(), Err(error));
        });
    }

    /// Returns the `owner/name` of every fetch in call order.
    #[must_use]
    pub fn fetched_repositories(&self) -> Vec<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .fetched
            .clone()
    }

    fn write_state(&self, f: impl FnOnce(&mut StaticSourceState)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    }
}

#[async_trait]
impl PullRequestSource for StaticPullRequestSource {
    async fn fetch_merged(
        &self,
        source: &RepositorySource,
    ) -> PullRequestSourceResult<Vec<MergedPullRequest>> {
        let full_name = source.full_name();
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.fetched.push(full_name.clone());
        state
            .listings
            .get(&full_name)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Workspace probe answering from a fixed table of path statuses.
///
/// Paths that were never registered report [`PathStatus::Missing`].
#[derive(Debug, Clone, Default)]
pub struct StaticWorkspaceProbe {
    statuses: HashMap<Utf8PathBuf, PathStatus>,
}

impl StaticWorkspaceProbe {
    /// Creates a probe that treats every path as missing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a reachable checkout directory.
    #[must_use]
    pub fn with_directory(self, path: impl Into<Utf8PathBuf>) -> Self {
        self.with_status(path, PathStatus::Directory)
    }

    /// Registers an explicit status for a path.
    #[must_use]
    pub fn with_status(mut self, path: impl Into<Utf8PathBuf>, status: PathStatus) -> Self {
        self.statuses.insert(path.into(), status);
        self
    }
}

impl WorkspaceProbe for StaticWorkspaceProbe {
    fn check(&self, path: &Utf8Path) -> PathStatus {
        self.statuses
            .get(path)
            .cloned()
            .unwrap_or(PathStatus::Missing)
    }
}
