//! Repository port for imported task persistence and idempotency checks.

use crate::import::domain::{ImportedTask, ProjectId, PullRequestNumber};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Result of attempting to insert an imported task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The task row was written.
    Inserted,
    /// A task for the same project and pull request number already existed.
    AlreadyExists,
}

/// Imported task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Reports whether a task for the pull request exists under the project.
    async fn exists_for_pull_request(
        &self,
        project_id: ProjectId,
        pr_number: PullRequestNumber,
    ) -> TaskRepositoryResult<bool>;

    /// Inserts a new task.
    ///
    /// A uniqueness conflict on (project, pull request number) is reported as
    /// [`InsertOutcome::AlreadyExists`] rather than an error.
    async fn insert(&self, task: &ImportedTask) -> TaskRepositoryResult<InsertOutcome>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
