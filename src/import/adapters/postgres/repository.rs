//! `PostgreSQL` store implementing the project and task repositories.

use super::{
    models::{NewProjectRow, NewTaskRow, TaskIdRow},
    schema::{projects, tasks},
};
use crate::import::{
    domain::{ImportedTask, Project, ProjectId, PullRequestNumber},
    ports::{
        InsertOutcome, ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult,
        TaskRepository, TaskRepositoryError, TaskRepositoryResult,
    },
};
use async_trait::async_trait;
use camino::Utf8Path;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// `PostgreSQL` connection pool type used by the import store.
pub type ImportPgPool = Pool<ConnectionManager<PgConnection>>;

/// Unique index guarding one task per (project, pull request number).
const TASK_PR_UNIQUE_INDEX: &str = "idx_tasks_project_pr_number_unique";

/// Unique constraint on `projects.repo_path`.
const PROJECT_REPO_PATH_UNIQUE: &str = "projects_repo_path_key";

/// Lookup matching the expression and predicate of [`TASK_PR_UNIQUE_INDEX`].
const TASK_BY_PR_NUMBER_SQL: &str = concat!(
    "SELECT id FROM tasks ",
    "WHERE project_id = $1 ",
    "AND metadata ? 'pr_number' ",
    "AND ((metadata->>'pr_number')::BIGINT) = $2 ",
    "LIMIT 1",
);

/// `PostgreSQL`-backed import store.
///
/// The pool is the run's only database resource: it is opened once before
/// the first repository and released when the store is dropped.
#[derive(Debug, Clone)]
pub struct PostgresImportStore {
    pool: ImportPgPool,
}

impl PostgresImportStore {
    /// Creates a store from an existing connection pool.
    #[must_use]
    pub const fn new(pool: ImportPgPool) -> Self {
        Self { pool }
    }

    /// Opens a single-connection pool for the database URL.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError`] when no connection can be established.
    pub fn connect(database_url: &str) -> Result<Self, PoolError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder().max_size(1).build(manager)?;
        Ok(Self::new(pool))
    }

    async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: PersistenceFailure,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(E::from_persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(E::from_persistence)?
    }
}

/// Port errors that can wrap an opaque persistence failure.
trait PersistenceFailure: Send + 'static {
    fn from_persistence<Err>(err: Err) -> Self
    where
        Err: std::error::Error + Send + Sync + 'static;
}

impl PersistenceFailure for ProjectRepositoryError {
    fn from_persistence<Err>(err: Err) -> Self
    where
        Err: std::error::Error + Send + Sync + 'static,
    {
        Self::persistence(err)
    }
}

impl PersistenceFailure for TaskRepositoryError {
    fn from_persistence<Err>(err: Err) -> Self
    where
        Err: std::error::Error + Send + Sync + 'static,
    {
        Self::persistence(err)
    }
}

#[async_trait]
impl ProjectRepository for PostgresImportStore {
    async fn find_by_repo_path(
        &self,
        repo_path: &Utf8Path,
    ) -> ProjectRepositoryResult<Option<ProjectId>> {
        let lookup_path = repo_path.as_str().to_owned();
        self.run_blocking(move |connection| {
            let id = projects::table
                .filter(projects::repo_path.eq(lookup_path.as_str()))
                .select(projects::id)
                .first::<uuid::Uuid>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(id.map(ProjectId::from_uuid))
        })
        .await
    }

    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let new_row = to_new_project_row(project)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_constraint(info.as_ref(), PROJECT_REPO_PATH_UNIQUE) =>
                    {
                        ProjectRepositoryError::DuplicateRepoPath(new_row.repo_path.clone())
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresImportStore {
    async fn exists_for_pull_request(
        &self,
        project_id: ProjectId,
        pr_number: PullRequestNumber,
    ) -> TaskRepositoryResult<bool> {
        let number = i64::try_from(pr_number.value()).map_err(TaskRepositoryError::persistence)?;
        self.run_blocking(move |connection| {
            let row = diesel::sql_query(TASK_BY_PR_NUMBER_SQL)
                .bind::<diesel::sql_types::Uuid, _>(project_id.into_inner())
                .bind::<diesel::sql_types::BigInt, _>(number)
                .get_result::<TaskIdRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;

            if let Some(existing) = &row {
                debug!(task_id = %existing.id, %pr_number, "task already imported");
            }
            Ok(row.is_some())
        })
        .await
    }

    async fn insert(&self, task: &ImportedTask) -> TaskRepositoryResult<InsertOutcome> {
        let new_row = to_new_task_row(task)?;
        self.run_blocking(move |connection| {
            match diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
            {
                Ok(_) => Ok(InsertOutcome::Inserted),
                Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info))
                    if is_constraint(info.as_ref(), TASK_PR_UNIQUE_INDEX) =>
                {
                    Ok(InsertOutcome::AlreadyExists)
                }
                Err(err) => Err(TaskRepositoryError::persistence(err)),
            }
        })
        .await
    }
}

fn to_new_project_row(project: &Project) -> ProjectRepositoryResult<NewProjectRow> {
    let metadata =
        serde_json::to_value(project.metadata()).map_err(ProjectRepositoryError::persistence)?;

    Ok(NewProjectRow {
        id: project.id().into_inner(),
        name: project.name().as_str().to_owned(),
        repo_path: project.repo_path().as_str().to_owned(),
        metadata,
        created_at: project.created_at(),
    })
}

fn to_new_task_row(task: &ImportedTask) -> TaskRepositoryResult<NewTaskRow> {
    let metadata =
        serde_json::to_value(task.metadata()).map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        project_id: task.project_id().into_inner(),
        completed_at: Some(task.completed_at()),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        metadata,
    })
}

fn is_constraint(info: &dyn DatabaseErrorInformation, name: &str) -> bool {
    info.constraint_name()
        .is_some_and(|constraint| constraint == name)
}
