//! Given steps for import run BDD scenarios.

use super::world::{ImportWorld, merged_at, run_async};
use pr_importer::import::{
    domain::{MergedPullRequest, PullRequestNumber},
    ports::PullRequestSourceError,
};
use rstest_bdd_macros::given;
use std::time::Duration;

#[given(r#"a checked out repository "{name}""#)]
fn checked_out_repository(world: &mut ImportWorld, name: String) -> Result<(), eyre::Report> {
    world.configure(&name)?;
    world.checked_out.push(name);
    Ok(())
}

#[given(r#"a repository "{name}" with no local checkout"#)]
fn repository_without_checkout(world: &mut ImportWorld, name: String) -> Result<(), eyre::Report> {
    world.configure(&name)
}

#[given(
    r#"repository "{name}" has merged pull request #{number:u64} titled "{title}" by "{author}""#
)]
fn repository_has_merged_pull_request(
    world: &mut ImportWorld,
    name: String,
    number: u64,
    title: String,
    author: String,
) -> Result<(), eyre::Report> {
    let pull_request = MergedPullRequest::new(PullRequestNumber::new(number)?, title, merged_at())
        .with_author_login(author);
    world.add_listing(&name, pull_request);
    Ok(())
}

#[given(r#"repository "{name}" cannot be listed"#)]
fn repository_cannot_be_listed(world: &mut ImportWorld, name: String) {
    world.pull_requests.set_failure(
        format!("{}/{name}", super::world::OWNER),
        PullRequestSourceError::TimedOut {
            program: "gh".to_owned(),
            timeout: Duration::from_secs(60),
        },
    );
}

#[given("the import has already run once")]
fn import_already_ran(world: &mut ImportWorld) {
    let service = world.service();
    let _summary = run_async(service.run(&world.sources));
}
