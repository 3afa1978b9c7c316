//! Pull request source backed by the GitHub CLI.
//!
//! Runs `gh pr list` in the repository checkout and decodes the JSON listing.
//! The `files` field of a listing may hold plain path strings or objects
//! carrying a `path` field; both shapes are flattened to path strings here so
//! that the import service only sees [`MergedPullRequest`] values.

use crate::import::{
    domain::{MergedPullRequest, PullRequestNumber, RepositorySource},
    ports::{PullRequestSource, PullRequestSourceError, PullRequestSourceResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tracing::warn;

/// Program invoked when no override is configured.
pub const DEFAULT_PROGRAM: &str = "gh";

/// Maximum number of merged pull requests requested per repository.
pub const MERGED_PULL_REQUEST_LIMIT: u32 = 500;

/// Time budget for a single listing.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const JSON_FIELDS: &str = "number,title,body,mergedAt,author,files";

/// [`PullRequestSource`] that shells out to `gh pr list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GhCliPullRequestSource {
    program: String,
    limit: u32,
    timeout: Duration,
}

impl GhCliPullRequestSource {
    /// Creates a source using `gh`, the 500-item cap, and a 60 second timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_owned(),
            limit: MERGED_PULL_REQUEST_LIMIT,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the program used for listings.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Overrides the invocation timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured program.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the configured timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the argument list for a repository listing.
    #[must_use]
    pub fn arguments(&self, source: &RepositorySource) -> Vec<String> {
        vec![
            "pr".to_owned(),
            "list".to_owned(),
            "--repo".to_owned(),
            source.full_name(),
            "--state".to_owned(),
            "merged".to_owned(),
            "--limit".to_owned(),
            self.limit.to_string(),
            "--json".to_owned(),
            JSON_FIELDS.to_owned(),
        ]
    }
}

impl Default for GhCliPullRequestSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PullRequestSource for GhCliPullRequestSource {
    async fn fetch_merged(
        &self,
        source: &RepositorySource,
    ) -> PullRequestSourceResult<Vec<MergedPullRequest>> {
        let mut command = Command::new(&self.program);
        command
            .args(self.arguments(source))
            .current_dir(source.path())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                return Err(PullRequestSourceError::Spawn {
                    program: self.program.clone(),
                    source: Arc::new(err),
                });
            }
            Err(_elapsed) => {
                return Err(PullRequestSourceError::TimedOut {
                    program: self.program.clone(),
                    timeout: self.timeout,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                repository = %source.full_name(),
                status = %output.status,
                stderr = %stderr.trim(),
                "pull request listing failed, treating as no merged pull requests"
            );
            return Ok(Vec::new());
        }

        parse_pull_requests(&output.stdout)
    }
}

/// Decodes a `gh pr list --json` listing.
///
/// Blank output decodes to an empty listing.
///
/// # Errors
///
/// Returns [`PullRequestSourceError::Decode`] when the output is not a JSON
/// array of pull requests or a pull request number is zero.
pub fn parse_pull_requests(stdout: &[u8]) -> PullRequestSourceResult<Vec<MergedPullRequest>> {
    if stdout.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let listing: Vec<GhPullRequest> = serde_json::from_slice(stdout)
        .map_err(|err| PullRequestSourceError::Decode(err.to_string()))?;
    listing
        .into_iter()
        .map(GhPullRequest::into_merged_pull_request)
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GhPullRequest {
    number: u64,
    title: String,
    #[serde(default)]
    body: Option<String>,
    merged_at: DateTime<Utc>,
    #[serde(default)]
    author: Option<GhAuthor>,
    #[serde(default)]
    files: Option<Vec<GhFileEntry>>,
}

#[derive(Debug, Deserialize)]
struct GhAuthor {
    #[serde(default)]
    login: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GhFileEntry {
    Path(String),
    Object { path: String },
}

impl GhFileEntry {
    fn into_path(self) -> String {
        match self {
            Self::Path(path) | Self::Object { path } => path,
        }
    }
}

impl GhPullRequest {
    fn into_merged_pull_request(self) -> PullRequestSourceResult<MergedPullRequest> {
        let number = PullRequestNumber::new(self.number)
            .map_err(|err| PullRequestSourceError::Decode(err.to_string()))?;
        let files = self
            .files
            .unwrap_or_default()
            .into_iter()
            .map(GhFileEntry::into_path);

        let mut pull_request =
            MergedPullRequest::new(number, self.title, self.merged_at).with_files(files);
        if let Some(body) = self.body {
            pull_request = pull_request.with_body(body);
        }
        if let Some(login) = self.author.and_then(|author| author.login) {
            pull_request = pull_request.with_author_login(login);
        }
        Ok(pull_request)
    }
}
