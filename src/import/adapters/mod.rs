//! Adapter implementations for pull-request import ports.

pub mod fs;
pub mod gh_cli;
pub mod memory;
pub mod postgres;
