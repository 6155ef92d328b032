//! Integration test utilities for the prayer API
//!
//! Helpers for running end-to-end tests against a real server backed by
//! PostgreSQL.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
