//! Then steps for import run BDD scenarios.

use super::world::{ImportWorld, merged_at};
use pr_importer::import::domain::{RepositoryOutcome, SkipReason};
use rstest_bdd_macros::then;

#[then(r#"repository "{name}" reports {discovered:u64} discovered and {imported:u64} new"#)]
fn repository_reports_counts(
    world: &ImportWorld,
    name: String,
    discovered: u64,
    imported: u64,
) -> Result<(), eyre::Report> {
    let report = world.report(&name)?;
    let expected = RepositoryOutcome::Imported {
        discovered: usize::try_from(discovered)?,
        imported: usize::try_from(imported)?,
    };
    if report.outcome() != &expected {
        return Err(eyre::eyre!(
            "expected {expected:?} for {name}, found {:?}",
            report.outcome()
        ));
    }
    Ok(())
}

#[then(
    r#"the task for pull request #{number:u64} in "{name}" is completed and authored by "{author}""#
)]
fn task_is_completed_and_authored(
    world: &ImportWorld,
    number: u64,
    name: String,
    author: String,
) -> Result<(), eyre::Report> {
    let project = world
        .project(&name)
        .ok_or_else(|| eyre::eyre!("no project stored for {name}"))?;
    let tasks = world.store.tasks_for_project(project.id());
    let task = tasks
        .iter()
        .find(|task| task.pull_request_number().value() == number)
        .ok_or_else(|| eyre::eyre!("no task for pull request #{number}"))?;

    if task.status().as_str() != "completed" {
        return Err(eyre::eyre!(
            "expected completed status, found {}",
            task.status().as_str()
        ));
    }
    if task.metadata().pr_author != author {
        return Err(eyre::eyre!(
            "expected author {author}, found {}",
            task.metadata().pr_author
        ));
    }
    if task.completed_at() != merged_at() {
        return Err(eyre::eyre!("completion time does not match merge time"));
    }
    Ok(())
}

#[then(r#"repository "{name}" has {count:u64} stored tasks"#)]
fn repository_has_stored_tasks(
    world: &ImportWorld,
    name: String,
    count: u64,
) -> Result<(), eyre::Report> {
    let project = world
        .project(&name)
        .ok_or_else(|| eyre::eyre!("no project stored for {name}"))?;
    let stored = world.store.tasks_for_project(project.id()).len();
    if stored != usize::try_from(count)? {
        return Err(eyre::eyre!("expected {count} tasks, found {stored}"));
    }
    Ok(())
}

#[then(r#"repository "{name}" is skipped because its path was not found"#)]
fn repository_is_skipped(world: &ImportWorld, name: String) -> Result<(), eyre::Report> {
    let report = world.report(&name)?;
    let expected = RepositoryOutcome::Skipped {
        reason: SkipReason::PathNotFound,
    };
    if report.outcome() != &expected {
        return Err(eyre::eyre!(
            "expected skip for {name}, found {:?}",
            report.outcome()
        ));
    }
    Ok(())
}

#[then(r#"no project exists for "{name}""#)]
fn no_project_exists(world: &ImportWorld, name: String) -> Result<(), eyre::Report> {
    if world.project(&name).is_some() {
        return Err(eyre::eyre!("unexpected project stored for {name}"));
    }
    Ok(())
}

#[then(r#"repository "{name}" reports an error"#)]
fn repository_reports_error(world: &ImportWorld, name: String) -> Result<(), eyre::Report> {
    let report = world.report(&name)?;
    if !matches!(report.outcome(), RepositoryOutcome::Failed { .. }) {
        return Err(eyre::eyre!(
            "expected failure for {name}, found {:?}",
            report.outcome()
        ));
    }
    Ok(())
}
