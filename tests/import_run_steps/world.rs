//! Shared world state for import run BDD scenarios.

use camino::Utf8Path;
use chrono::{TimeZone, Utc};
use mockable::DefaultClock;
use pr_importer::import::{
    adapters::memory::{InMemoryImportStore, StaticPullRequestSource, StaticWorkspaceProbe},
    domain::{ImportSummary, MergedPullRequest, Project, RepositoryReport, RepositorySource},
    services::ImportService,
};
use rstest::fixture;
use std::collections::HashMap;
use std::sync::Arc;

/// Owner used for every scenario repository.
pub const OWNER: &str = "zenjoymedia";

/// Service type used by the BDD world.
pub type TestImportService =
    ImportService<InMemoryImportStore, StaticPullRequestSource, StaticWorkspaceProbe, DefaultClock>;

/// Scenario world for import run behaviour tests.
pub struct ImportWorld {
    pub store: Arc<InMemoryImportStore>,
    pub pull_requests: Arc<StaticPullRequestSource>,
    pub checked_out: Vec<String>,
    pub sources: Vec<RepositorySource>,
    pub listings: HashMap<String, Vec<MergedPullRequest>>,
    pub last_summary: Option<ImportSummary>,
}

impl ImportWorld {
    /// Creates a world with no configured repositories.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryImportStore::new()),
            pull_requests: Arc::new(StaticPullRequestSource::new()),
            checked_out: Vec::new(),
            sources: Vec::new(),
            listings: HashMap::new(),
            last_summary: None,
        }
    }

    /// Adds a repository to the configured list.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a valid repository name.
    pub fn configure(&mut self, name: &str) -> Result<(), eyre::Report> {
        let source = RepositorySource::new(repo_path(name), name, OWNER)?;
        self.sources.push(source);
        Ok(())
    }

    /// Appends a merged pull request to a repository listing.
    pub fn add_listing(&mut self, name: &str, pull_request: MergedPullRequest) {
        let listing = self.listings.entry(name.to_owned()).or_default();
        listing.push(pull_request);
        self.pull_requests
            .set_listing(format!("{OWNER}/{name}"), listing.clone());
    }

    /// Builds a service over the world's store and listings.
    #[must_use]
    pub fn service(&self) -> TestImportService {
        let probe = self
            .checked_out
            .iter()
            .fold(StaticWorkspaceProbe::new(), |probe, name| {
                probe.with_directory(repo_path(name))
            });
        ImportService::new(
            Arc::clone(&self.store),
            Arc::clone(&self.pull_requests),
            Arc::new(probe),
            Arc::new(DefaultClock),
        )
    }

    /// Returns the report for a repository from the last run.
    ///
    /// # Errors
    ///
    /// Returns an error if no run happened or the repository is absent.
    pub fn report(&self, name: &str) -> Result<&RepositoryReport, eyre::Report> {
        let summary = self
            .last_summary
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing import summary in scenario world"))?;
        summary
            .reports()
            .iter()
            .find(|report| report.repository().as_str() == name)
            .ok_or_else(|| eyre::eyre!("no report for repository {name}"))
    }

    /// Returns the project stored for a repository.
    #[must_use]
    pub fn project(&self, name: &str) -> Option<Project> {
        self.store
            .project_for_path(Utf8Path::new(&repo_path(name)))
    }
}

impl Default for ImportWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ImportWorld {
    ImportWorld::default()
}

/// Local checkout path for a scenario repository.
#[must_use]
pub fn repo_path(name: &str) -> String {
    format!("/home/xx/dev/{name}")
}

/// Merge time used for scenario pull requests.
#[must_use]
pub fn merged_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
