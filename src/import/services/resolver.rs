//! Find-or-create resolution of projects by repository path.

use crate::import::{
    domain::{Project, ProjectId, RepositorySource},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Resolves the project owning a repository, creating it on first encounter.
#[derive(Clone)]
pub struct ProjectResolver<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ProjectResolver<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a resolver.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the project for the repository path, creating one if absent.
    ///
    /// When a concurrent writer creates the same project between lookup and
    /// insert, the winner's identifier is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError`] when the store lookup or insert
    /// fails.
    pub async fn resolve(&self, source: &RepositorySource) -> ProjectRepositoryResult<ProjectId> {
        if let Some(existing) = self.repository.find_by_repo_path(source.path()).await? {
            return Ok(existing);
        }

        let project = Project::auto_created(source, &*self.clock);
        match self.repository.store(&project).await {
            Ok(()) => {
                info!(
                    repository = %source.name(),
                    project_id = %project.id(),
                    "created project"
                );
                Ok(project.id())
            }
            Err(ProjectRepositoryError::DuplicateRepoPath(repo_path)) => self
                .repository
                .find_by_repo_path(source.path())
                .await?
                .ok_or(ProjectRepositoryError::DuplicateRepoPath(repo_path)),
            Err(err) => Err(err),
        }
    }
}
