//! Filesystem probe backed by capability-based directory handles.

use crate::import::ports::{PathStatus, WorkspaceProbe};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use camino::Utf8Path;
use std::io;

/// Probe that opens repository paths with ambient authority.
///
/// A path counts as reachable only when it can be opened as a directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmbientWorkspaceProbe;

impl AmbientWorkspaceProbe {
    /// Creates the probe.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl WorkspaceProbe for AmbientWorkspaceProbe {
    fn check(&self, path: &Utf8Path) -> PathStatus {
        match Dir::open_ambient_dir(path, ambient_authority()) {
            Ok(_dir) => PathStatus::Directory,
            Err(err) => classify_open_error(&err),
        }
    }
}

fn classify_open_error(err: &io::Error) -> PathStatus {
    match err.kind() {
        io::ErrorKind::NotFound => PathStatus::Missing,
        io::ErrorKind::NotADirectory => PathStatus::NotADirectory,
        _ => PathStatus::Inaccessible(err.to_string()),
    }
}
