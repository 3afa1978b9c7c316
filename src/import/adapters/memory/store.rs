//! In-memory project and task store.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::import::{
    domain::{ImportedTask, Project, ProjectId, PullRequestNumber, TaskId},
    ports::{
        InsertOutcome, ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult,
        TaskRepository, TaskRepositoryError, TaskRepositoryResult,
    },
};

/// Thread-safe in-memory store implementing both import repositories.
///
/// Mirrors the `PostgreSQL` constraints: repository paths are unique across
/// projects and (project, pull request number) is unique across tasks.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImportStore {
    state: Arc<RwLock<InMemoryImportState>>,
}

#[derive(Debug, Default)]
struct InMemoryImportState {
    projects: HashMap<Utf8PathBuf, Project>,
    tasks: HashMap<TaskId, ImportedTask>,
    pull_request_index: HashMap<(ProjectId, PullRequestNumber), TaskId>,
    failing_paths: HashSet<Utf8PathBuf>,
    writes: usize,
}

impl InMemoryImportStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every project operation for `repo_path` fail with a persistence
    /// error.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when lock acquisition fails.
    pub fn fail_project_operations_for(
        &self,
        repo_path: impl Into<Utf8PathBuf>,
    ) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.failing_paths.insert(repo_path.into());
        Ok(())
    }

    /// Returns the number of stored projects.
    #[must_use]
    pub fn project_count(&self) -> usize {
        self.read_state(|state| state.projects.len())
    }

    /// Returns the number of stored tasks.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.read_state(|state| state.tasks.len())
    }

    /// Returns the number of successful writes of any kind.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.read_state(|state| state.writes)
    }

    /// Returns the project stored for a repository path.
    #[must_use]
    pub fn project_for_path(&self, repo_path: &Utf8Path) -> Option<Project> {
        self.read_state(|state| state.projects.get(repo_path).cloned())
    }

    /// Returns the tasks owned by a project, ordered by pull request number.
    #[must_use]
    pub fn tasks_for_project(&self, project_id: ProjectId) -> Vec<ImportedTask> {
        self.read_state(|state| {
            let mut tasks: Vec<ImportedTask> = state
                .tasks
                .values()
                .filter(|task| task.project_id() == project_id)
                .cloned()
                .collect();
            tasks.sort_by_key(ImportedTask::pull_request_number);
            tasks
        })
    }

    fn read_state<T>(&self, f: impl FnOnce(&InMemoryImportState) -> T) -> T {
        let state = self
            .state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&state)
    }
}

#[async_trait]
impl ProjectRepository for InMemoryImportStore {
    async fn find_by_repo_path(
        &self,
        repo_path: &Utf8Path,
    ) -> ProjectRepositoryResult<Option<ProjectId>> {
        let state = self.state.read().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.failing_paths.contains(repo_path) {
            return Err(ProjectRepositoryError::persistence(std::io::Error::other(
                format!("injected failure for {repo_path}"),
            )));
        }
        Ok(state.projects.get(repo_path).map(Project::id))
    }

    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let repo_path = project.repo_path().to_owned();
        if state.failing_paths.contains(&repo_path) {
            return Err(ProjectRepositoryError::persistence(std::io::Error::other(
                format!("injected failure for {repo_path}"),
            )));
        }
        if state.projects.contains_key(&repo_path) {
            return Err(ProjectRepositoryError::DuplicateRepoPath(
                repo_path.into_string(),
            ));
        }

        state.projects.insert(repo_path, project.clone());
        state.writes += 1;
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryImportStore {
    async fn exists_for_pull_request(
        &self,
        project_id: ProjectId,
        pr_number: PullRequestNumber,
    ) -> TaskRepositoryResult<bool> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .pull_request_index
            .contains_key(&(project_id, pr_number)))
    }

    async fn insert(&self, task: &ImportedTask) -> TaskRepositoryResult<InsertOutcome> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let key = (task.project_id(), task.pull_request_number());
        if state.pull_request_index.contains_key(&key) {
            return Ok(InsertOutcome::AlreadyExists);
        }

        state.pull_request_index.insert(key, task.id());
        state.tasks.insert(task.id(), task.clone());
        state.writes += 1;
        Ok(InsertOutcome::Inserted)
    }
}
