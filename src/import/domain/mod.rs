//! Domain model for pull-request import.
//!
//! Repository descriptors, normalized pull-request records, the project and
//! task entities written to the store, and the per-run summary live here.
//! Nothing in this module touches the filesystem, the database, or a child
//! process.

mod error;
mod ids;
mod project;
mod pull_request;
mod source;
mod summary;
mod task;

pub use error::ImportDomainError;
pub use ids::{ProjectId, PullRequestNumber, TaskId};
pub use project::{Project, ProjectMetadata};
pub use pull_request::MergedPullRequest;
pub use source::{AccountName, RepositoryName, RepositorySource};
pub use summary::{ImportSummary, RepositoryOutcome, RepositoryReport, SkipReason};
pub use task::{ImportedTask, PullRequestTaskMetadata, TaskStatus};
