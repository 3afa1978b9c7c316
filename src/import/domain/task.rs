//! Task rows derived from merged pull requests.

use super::{MergedPullRequest, ProjectId, PullRequestNumber, RepositoryName, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author recorded when the pull request payload carries no login.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// Provenance tag stored in `metadata.source` for imported tasks.
pub const PR_IMPORT_SOURCE: &str = "pr_import";

/// Task status written by the importer.
///
/// Imported pull requests are already merged, so the importer only ever
/// produces completed tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has been completed.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
        }
    }
}

/// Denormalized pull-request metadata persisted in `tasks.metadata`.
///
/// `pr_number` is the idempotency key together with the owning project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestTaskMetadata {
    /// Pull request number on the hosted remote.
    pub pr_number: PullRequestNumber,
    /// Author login, or [`UNKNOWN_AUTHOR`].
    pub pr_author: String,
    /// Changed file paths in retrieval order.
    pub pr_files: Vec<String>,
    /// Provenance tag, always [`PR_IMPORT_SOURCE`].
    pub source: String,
    /// Repository name the pull request was merged into.
    pub repo: String,
}

/// A completed task created from one merged pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedTask {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    description: String,
    status: TaskStatus,
    completed_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    metadata: PullRequestTaskMetadata,
}

impl ImportedTask {
    /// Maps a merged pull request onto a new completed task.
    ///
    /// The description falls back to an empty string and every timestamp is
    /// the merge time, so re-imports of the same record are identical apart
    /// from the generated identifier.
    #[must_use]
    pub fn from_pull_request(
        project_id: ProjectId,
        repository: &RepositoryName,
        pull_request: &MergedPullRequest,
    ) -> Self {
        let merged_at = pull_request.merged_at();
        let metadata = PullRequestTaskMetadata {
            pr_number: pull_request.number(),
            pr_author: pull_request
                .author_login()
                .unwrap_or(UNKNOWN_AUTHOR)
                .to_owned(),
            pr_files: pull_request.files().to_vec(),
            source: PR_IMPORT_SOURCE.to_owned(),
            repo: repository.as_str().to_owned(),
        };

        Self {
            id: TaskId::new(),
            project_id,
            title: pull_request.title().to_owned(),
            description: pull_request.body().unwrap_or_default().to_owned(),
            status: TaskStatus::Completed,
            completed_at: merged_at,
            created_at: merged_at,
            updated_at: merged_at,
            metadata,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the completion timestamp.
    #[must_use]
    pub const fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the pull-request metadata.
    #[must_use]
    pub const fn metadata(&self) -> &PullRequestTaskMetadata {
        &self.metadata
    }

    /// Returns the pull request number this task was created from.
    #[must_use]
    pub const fn pull_request_number(&self) -> PullRequestNumber {
        self.metadata.pr_number
    }
}
