//! Merged pull-request import into the task store.
//!
//! Each configured repository is checked on disk, resolved to a project row,
//! queried for merged pull requests, and every unseen pull request becomes a
//! completed task. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
