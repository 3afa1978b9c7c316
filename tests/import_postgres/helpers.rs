//! Shared test helpers for `PostgreSQL` integration tests.

use super::cluster::embedded_database_url;
use chrono::{DateTime, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use pr_importer::import::{
    adapters::postgres::PostgresImportStore,
    domain::{MergedPullRequest, PullRequestNumber, RepositorySource},
};
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming the test database.
pub const DATABASE_URL_VAR: &str = "PR_IMPORTER_TEST_DATABASE_URL";

/// SQL creating the projects and tasks tables.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-19-000000_create_projects_and_tasks/up.sql");

static SCHEMA_LOCK: OnceLock<Mutex<bool>> = OnceLock::new();

/// Returns the external test database URL, falling back to the embedded
/// cluster when `PR_IMPORTER_TEST_DATABASE_URL` is unset.
///
/// # Errors
///
/// Returns an error if the embedded cluster cannot be started.
pub fn database_url() -> Result<String, BoxError> {
    match std::env::var(DATABASE_URL_VAR) {
        Ok(url) if !url.trim().is_empty() => Ok(url),
        _ => embedded_database_url(),
    }
}

/// Applies the schema once per process and connects a store.
///
/// # Errors
///
/// Returns an error if no database is reachable, the schema cannot be
/// applied, or the pool cannot connect.
pub fn connect_store() -> Result<(String, PostgresImportStore), BoxError> {
    let url = database_url()?;
    ensure_schema(&url)?;
    let store = PostgresImportStore::connect(&url)?;
    Ok((url, store))
}

fn ensure_schema(url: &str) -> Result<(), BoxError> {
    let lock = SCHEMA_LOCK.get_or_init(|| Mutex::new(false));
    let mut applied = lock
        .lock()
        .map_err(|err| -> BoxError { err.to_string().into() })?;
    if !*applied {
        let mut conn = PgConnection::establish(url)?;
        conn.batch_execute(CREATE_SCHEMA_SQL)?;
        *applied = true;
    }
    Ok(())
}

/// Repository source with a path unique to this test invocation.
#[must_use]
pub fn unique_source(name: &str) -> RepositorySource {
    let path = format!("/tmp/pr-importer-tests/{}/{name}", Uuid::new_v4());
    RepositorySource::new(path, name, "zenjoymedia").expect("valid repository source")
}

/// Fixed merge timestamp used by test pull requests.
#[must_use]
pub fn merged_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Merged pull request with the given number and title.
#[must_use]
pub fn merged(number: u64, title: &str) -> MergedPullRequest {
    MergedPullRequest::new(
        PullRequestNumber::new(number).expect("valid pull request number"),
        title,
        merged_at(),
    )
}

/// Counts task rows owned by a project.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_tasks(url: &str, project_id: Uuid) -> Result<i64, BoxError> {
    #[derive(QueryableByName)]
    struct CountRow {
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        count: i64,
    }

    let mut conn = PgConnection::establish(url)?;
    let row = diesel::sql_query("SELECT COUNT(*) AS count FROM tasks WHERE project_id = $1")
        .bind::<diesel::sql_types::Uuid, _>(project_id)
        .get_result::<CountRow>(&mut conn)?;
    Ok(row.count)
}
