//! Step definitions for import run behaviour tests.

pub mod given;
pub mod then;
pub mod world;
