//! Project and task persistence against `PostgreSQL`.

use super::helpers::{connect_store, count_tasks, merged, unique_source};
use mockable::DefaultClock;
use pr_importer::import::{
    domain::{ImportedTask, Project, PullRequestNumber},
    ports::{InsertOutcome, ProjectRepository, ProjectRepositoryError, TaskRepository},
};
use rstest::rstest;

#[rstest]
#[ignore = "requires PostgreSQL: uses PR_IMPORTER_TEST_DATABASE_URL or an embedded cluster"]
#[tokio::test(flavor = "multi_thread")]
async fn project_is_found_by_repo_path() {
    let (_url, store) = connect_store().expect("test database");
    let source = unique_source("cecelia-core");
    let project = Project::auto_created(&source, &DefaultClock);

    let before = store
        .find_by_repo_path(source.path())
        .await
        .expect("lookup before insert");
    store.store(&project).await.expect("project insert");
    let after = store
        .find_by_repo_path(source.path())
        .await
        .expect("lookup after insert");

    assert_eq!(before, None);
    assert_eq!(after, Some(project.id()));
}

#[rstest]
#[ignore = "requires PostgreSQL: uses PR_IMPORTER_TEST_DATABASE_URL or an embedded cluster"]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_project_path_is_reported() {
    let (_url, store) = connect_store().expect("test database");
    let source = unique_source("geoai");
    store
        .store(&Project::auto_created(&source, &DefaultClock))
        .await
        .expect("first project insert");

    let result = store
        .store(&Project::auto_created(&source, &DefaultClock))
        .await;

    assert!(matches!(
        result,
        Err(ProjectRepositoryError::DuplicateRepoPath(ref path)) if path == source.path().as_str()
    ));
}

#[rstest]
#[ignore = "requires PostgreSQL: uses PR_IMPORTER_TEST_DATABASE_URL or an embedded cluster"]
#[tokio::test(flavor = "multi_thread")]
async fn task_lookup_matches_project_and_number() {
    let (url, store) = connect_store().expect("test database");
    let source = unique_source("creator");
    let project = Project::auto_created(&source, &DefaultClock);
    store.store(&project).await.expect("project insert");
    let pull_request = merged(42, "Fix bug").with_author_login("alice");
    let task = ImportedTask::from_pull_request(project.id(), source.name(), &pull_request);

    let outcome = store.insert(&task).await.expect("task insert");
    let present = store
        .exists_for_pull_request(project.id(), PullRequestNumber::new(42).expect("number"))
        .await
        .expect("lookup of imported number");
    let absent = store
        .exists_for_pull_request(project.id(), PullRequestNumber::new(4).expect("number"))
        .await
        .expect("lookup of unknown number");

    assert_eq!(outcome, InsertOutcome::Inserted);
    assert!(present);
    assert!(!absent);
    assert_eq!(
        count_tasks(&url, project.id().into_inner()).expect("count tasks"),
        1
    );
}

#[rstest]
#[ignore = "requires PostgreSQL: uses PR_IMPORTER_TEST_DATABASE_URL or an embedded cluster"]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_pull_request_insert_is_already_exists() {
    let (url, store) = connect_store().expect("test database");
    let source = unique_source("infrastructure");
    let project = Project::auto_created(&source, &DefaultClock);
    store.store(&project).await.expect("project insert");
    let pull_request = merged(7, "Seven");
    let first = ImportedTask::from_pull_request(project.id(), source.name(), &pull_request);
    let second = ImportedTask::from_pull_request(project.id(), source.name(), &pull_request);

    let first_outcome = store.insert(&first).await.expect("first insert");
    let second_outcome = store.insert(&second).await.expect("second insert");

    assert_eq!(first_outcome, InsertOutcome::Inserted);
    assert_eq!(second_outcome, InsertOutcome::AlreadyExists);
    assert_eq!(
        count_tasks(&url, project.id().into_inner()).expect("count tasks"),
        1
    );
}
