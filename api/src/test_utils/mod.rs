//! Test utilities
//!
//! In-memory repository implementations and test fixtures for unit testing.
//!
//! The in-memory repositories cover the happy paths; failure injection on a
//! single port uses the `mockall` mocks generated next to the port traits.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
