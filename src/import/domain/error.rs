//! Error types for import domain validation.

use thiserror::Error;

/// Errors returned while constructing import domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImportDomainError {
    /// The repository path is empty after trimming.
    #[error("repository path must not be empty")]
    EmptyRepositoryPath,

    /// The repository name is empty after trimming.
    #[error("invalid repository name '{0}'")]
    InvalidRepositoryName(String),

    /// The owning account name is empty after trimming.
    #[error("invalid account name '{0}'")]
    InvalidAccountName(String),

    /// The pull request number is invalid.
    #[error("invalid pull request number {0}, expected a positive integer")]
    InvalidPullRequestNumber(u64),
}
