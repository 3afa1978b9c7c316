//! Port contracts for pull-request import.
//!
//! Ports define infrastructure-agnostic interfaces used by import services.

pub mod project;
pub mod pull_requests;
pub mod task;
pub mod workspace;

pub use project::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
pub use pull_requests::{PullRequestSource, PullRequestSourceError, PullRequestSourceResult};
pub use task::{InsertOutcome, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use workspace::{PathStatus, WorkspaceProbe};

#[cfg(test)]
pub use pull_requests::MockPullRequestSource;
