//! Per-repository import loop with failure isolation.

use super::ProjectResolver;
use crate::import::{
    domain::{
        ImportSummary, ImportedTask, MergedPullRequest, ProjectId, RepositoryName,
        RepositoryOutcome, RepositoryReport, RepositorySource, SkipReason,
    },
    ports::{
        InsertOutcome, PathStatus, ProjectRepository, ProjectRepositoryError,
        PullRequestSource, PullRequestSourceError, TaskRepository, TaskRepositoryError,
        WorkspaceProbe,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors that abort the import of a single repository.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Project lookup or creation failed.
    #[error(transparent)]
    Project(#[from] ProjectRepositoryError),
    /// Task lookup or insertion failed.
    #[error(transparent)]
    Task(#[from] TaskRepositoryError),
    /// Pull request retrieval failed.
    #[error(transparent)]
    Retrieval(#[from] PullRequestSourceError),
}

/// Result type for import service operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Imports merged pull requests for configured repositories.
///
/// Repositories are processed one at a time in the given order and pull
/// requests in retrieval order. A failing repository is recorded in the
/// summary and never stops the run; tasks inserted before the failure stay.
#[derive(Clone)]
pub struct ImportService<S, P, W, C>
where
    S: ProjectRepository + TaskRepository,
    P: PullRequestSource,
    W: WorkspaceProbe,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    pull_requests: Arc<P>,
    probe: Arc<W>,
    resolver: ProjectResolver<S, C>,
}

impl<S, P, W, C> ImportService<S, P, W, C>
where
    S: ProjectRepository + TaskRepository,
    P: PullRequestSource,
    W: WorkspaceProbe,
    C: Clock + Send + Sync,
{
    /// Creates an import service.
    #[must_use]
    pub fn new(store: Arc<S>, pull_requests: Arc<P>, probe: Arc<W>, clock: Arc<C>) -> Self {
        let resolver = ProjectResolver::new(Arc::clone(&store), clock);
        Self {
            store,
            pull_requests,
            probe,
            resolver,
        }
    }

    /// Imports every repository and returns the run summary.
    pub async fn run(&self, sources: &[RepositorySource]) -> ImportSummary {
        let mut summary = ImportSummary::new();
        for source in sources {
            summary.record(self.import_repository(source).await);
        }
        info!(
            discovered = summary.total_discovered(),
            imported = summary.total_imported(),
            skipped = summary.skipped_count(),
            failed = summary.failed_count(),
            "import run finished"
        );
        summary
    }

    /// Imports one repository, converting any failure into a report entry.
    pub async fn import_repository(&self, source: &RepositorySource) -> RepositoryReport {
        info!(
            repository = %source.name(),
            remote = %source.full_name(),
            "importing repository"
        );
        let outcome = match self.try_import(source).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(repository = %source.name(), error = %err, "repository import failed");
                RepositoryOutcome::Failed {
                    message: err.to_string(),
                }
            }
        };
        RepositoryReport::new(source.name().clone(), outcome)
    }

    /// Inserts a task for the pull request unless one already exists under
    /// the project.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Task`] when the lookup or insert fails.
    pub async fn upsert_pull_request(
        &self,
        project_id: ProjectId,
        repository: &RepositoryName,
        pull_request: &MergedPullRequest,
    ) -> ImportResult<InsertOutcome> {
        let pr_number = pull_request.number();
        if self
            .store
            .exists_for_pull_request(project_id, pr_number)
            .await?
        {
            debug!(%repository, %pr_number, "pull request already imported");
            return Ok(InsertOutcome::AlreadyExists);
        }

        let task = ImportedTask::from_pull_request(project_id, repository, pull_request);
        let outcome = self.store.insert(&task).await?;
        if outcome == InsertOutcome::AlreadyExists {
            debug!(%repository, %pr_number, "pull request imported concurrently");
        }
        Ok(outcome)
    }

    async fn try_import(&self, source: &RepositorySource) -> ImportResult<RepositoryOutcome> {
        if let Some(reason) = skip_reason(self.probe.check(source.path())) {
            warn!(
                repository = %source.name(),
                path = %source.path(),
                %reason,
                "skipping repository"
            );
            return Ok(RepositoryOutcome::Skipped { reason });
        }

        let project_id = self.resolver.resolve(source).await?;
        let pull_requests = self.pull_requests.fetch_merged(source).await?;
        info!(
            repository = %source.name(),
            count = pull_requests.len(),
            "found merged pull requests"
        );

        let mut imported = 0;
        for pull_request in &pull_requests {
            let outcome = self
                .upsert_pull_request(project_id, source.name(), pull_request)
                .await?;
            if outcome == InsertOutcome::Inserted {
                imported += 1;
            }
        }

        info!(repository = %source.name(), imported, "imported new tasks");
        Ok(RepositoryOutcome::Imported {
            discovered: pull_requests.len(),
            imported,
        })
    }
}

fn skip_reason(status: PathStatus) -> Option<SkipReason> {
    match status {
        PathStatus::Directory => None,
        PathStatus::Missing => Some(SkipReason::PathNotFound),
        PathStatus::NotADirectory => Some(SkipReason::NotADirectory),
        PathStatus::Inaccessible(message) => Some(SkipReason::Inaccessible(message)),
    }
}
