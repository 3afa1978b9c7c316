//! Merged pull-request importer.
//!
//! This crate imports merged pull requests from a fixed list of GitHub
//! repositories into a `PostgreSQL` task store. Each repository gets a
//! project row, and every pull request not seen before becomes one completed
//! task tagged with its pull request number, so re-running the import never
//! duplicates work.
//!
//! # Architecture
//!
//! The importer follows hexagonal architecture principles:
//!
//! - **Domain**: Repository descriptors, normalized pull requests, tasks
//! - **Ports**: Store, retrieval, and filesystem traits
//! - **Adapters**: `PostgreSQL`, the `gh` CLI, `cap-std`, and in-memory doubles
//!
//! # Modules
//!
//! - [`import`]: Import pipeline
//! - [`config`]: Embedded repository list and run settings
//! - [`telemetry`]: Logging setup

pub mod config;
pub mod import;
pub mod telemetry;
