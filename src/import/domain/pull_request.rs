//! Normalized merged pull-request records.

use super::PullRequestNumber;
use chrono::{DateTime, Utc};

/// A merged pull request as handed to the importer.
///
/// Retrieval adapters normalize provider payloads into this shape: the file
/// list is always an ordered sequence of plain path strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedPullRequest {
    number: PullRequestNumber,
    title: String,
    body: Option<String>,
    merged_at: DateTime<Utc>,
    author_login: Option<String>,
    files: Vec<String>,
}

impl MergedPullRequest {
    /// Creates a record with the required fields.
    #[must_use]
    pub fn new(
        number: PullRequestNumber,
        title: impl Into<String>,
        merged_at: DateTime<Utc>,
    ) -> Self {
        Self {
            number,
            title: title.into(),
            body: None,
            merged_at,
            author_login: None,
            files: Vec::new(),
        }
    }

    /// Sets the pull request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the author login. Blank logins are treated as absent.
    #[must_use]
    pub fn with_author_login(mut self, login: impl Into<String>) -> Self {
        let value = login.into();
        self.author_login = (!value.trim().is_empty()).then_some(value);
        self
    }

    /// Sets the changed file paths, preserving order.
    #[must_use]
    pub fn with_files(mut self, files: impl IntoIterator<Item = String>) -> Self {
        self.files = files.into_iter().collect();
        self
    }

    /// Returns the pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    /// Returns the pull request title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the pull request body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the merge timestamp.
    #[must_use]
    pub const fn merged_at(&self) -> DateTime<Utc> {
        self.merged_at
    }

    /// Returns the author login, if known.
    #[must_use]
    pub fn author_login(&self) -> Option<&str> {
        self.author_login.as_deref()
    }

    /// Returns the changed file paths.
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }
}
