//! Project entity created for each imported repository.

use super::{ProjectId, RepositoryName, RepositorySource};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Value recorded in `created_by` for projects this importer creates.
pub const PROJECT_CREATOR: &str = "pr-importer";

/// Metadata persisted with auto-created projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Marks the project as created without user input.
    pub auto_created: bool,
    /// Tool that created the project.
    pub created_by: String,
}

impl ProjectMetadata {
    /// Metadata for a project created by this importer.
    #[must_use]
    pub fn auto_created() -> Self {
        Self {
            auto_created: true,
            created_by: PROJECT_CREATOR.to_owned(),
        }
    }
}

/// Project row keyed by repository path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: ProjectId,
    name: RepositoryName,
    repo_path: Utf8PathBuf,
    metadata: ProjectMetadata,
    created_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project for a repository encountered for the first time.
    #[must_use]
    pub fn auto_created(source: &RepositorySource, clock: &impl Clock) -> Self {
        Self {
            id: ProjectId::new(),
            name: source.name().clone(),
            repo_path: source.path().to_owned(),
            metadata: ProjectMetadata::auto_created(),
            created_at: clock.utc(),
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &RepositoryName {
        &self.name
    }

    /// Returns the repository path used as the unique lookup key.
    #[must_use]
    pub fn repo_path(&self) -> &Utf8Path {
        &self.repo_path
    }

    /// Returns the project metadata.
    #[must_use]
    pub const fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
