//! Repository port for project lookup and creation.

use crate::import::domain::{Project, ProjectId};
use async_trait::async_trait;
use camino::Utf8Path;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Finds the project whose repository path matches exactly.
    ///
    /// Returns `None` when no project exists for the path.
    async fn find_by_repo_path(
        &self,
        repo_path: &Utf8Path,
    ) -> ProjectRepositoryResult<Option<ProjectId>>;

    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateRepoPath`] when another
    /// project already owns the repository path.
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project for the repository path already exists.
    #[error("duplicate project repository path: {0}")]
    DuplicateRepoPath(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
