//! Port for checking local repository checkouts.

use camino::Utf8Path;

/// Result of probing a repository path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStatus {
    /// The path is a directory that can be opened.
    Directory,
    /// Nothing exists at the path.
    Missing,
    /// The path exists but is not a directory.
    NotADirectory,
    /// The path exists but could not be opened.
    Inaccessible(String),
}

/// Filesystem probe for configured repository paths.
pub trait WorkspaceProbe: Send + Sync {
    /// Reports whether the path is a usable checkout directory.
    fn check(&self, path: &Utf8Path) -> PathStatus;
}
