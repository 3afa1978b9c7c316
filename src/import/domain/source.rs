//! Repository descriptors supplied by configuration.

use super::ImportDomainError;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Repository name on the hosted remote, without the owner segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Creates a validated repository name.
    ///
    /// # Errors
    ///
    /// Returns [`ImportDomainError::InvalidRepositoryName`] when the trimmed
    /// value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, ImportDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(ImportDomainError::InvalidRepositoryName(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the repository name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RepositoryName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// User or organization account that owns a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountName(String);

impl AccountName {
    /// Creates a validated account name.
    ///
    /// # Errors
    ///
    /// Returns [`ImportDomainError::InvalidAccountName`] when the trimmed
    /// value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, ImportDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(ImportDomainError::InvalidAccountName(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the account name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A local checkout paired with the hosted repository it tracks.
///
/// The repository path doubles as the project's unique key in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositorySource {
    path: Utf8PathBuf,
    name: RepositoryName,
    owner: AccountName,
}

impl RepositorySource {
    /// Creates a repository descriptor from raw configuration values.
    ///
    /// # Errors
    ///
    /// Returns an [`ImportDomainError`] when the path, name, or owner is empty.
    pub fn new(
        path: impl Into<Utf8PathBuf>,
        name: impl Into<String>,
        owner: impl Into<String>,
    ) -> Result<Self, ImportDomainError> {
        let raw_path = path.into();
        if raw_path.as_str().trim().is_empty() {
            return Err(ImportDomainError::EmptyRepositoryPath);
        }

        Ok(Self {
            path: raw_path,
            name: RepositoryName::new(name)?,
            owner: AccountName::new(owner)?,
        })
    }

    /// Returns the local checkout path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the repository name.
    #[must_use]
    pub const fn name(&self) -> &RepositoryName {
        &self.name
    }

    /// Returns the owning account.
    #[must_use]
    pub const fn owner(&self) -> &AccountName {
        &self.owner
    }

    /// Returns the `owner/name` form used by the hosted remote.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}
