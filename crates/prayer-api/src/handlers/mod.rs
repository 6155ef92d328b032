//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod health;
pub mod prayer;
pub mod prayer_chains;
