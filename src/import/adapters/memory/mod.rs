//! In-memory adapters for import tests and dry runs.

mod sources;
mod store;

pub use sources::{StaticPullRequestSource, StaticWorkspaceProbe};
pub use store::InMemoryImportStore;
