//! Axum extractors for request handling
//!
//! Custom extractors for authentication, path IDs, and validated bodies.

mod auth;
mod path;
mod validated;

pub use auth::AuthUser;
pub use path::{CommitmentPath, IdPath};
pub use validated::ValidatedJson;
