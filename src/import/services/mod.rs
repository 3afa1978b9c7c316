//! Application services for pull-request import orchestration.

mod importer;
mod resolver;

pub use importer::{ImportError, ImportResult, ImportService};
pub use resolver::ProjectResolver;
