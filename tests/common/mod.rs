//! Helpers shared by the mock-site integration tests

pub mod assertions;
pub mod config;
pub mod fixtures;

pub use assertions::*;
pub use config::*;
pub use fixtures::*;
