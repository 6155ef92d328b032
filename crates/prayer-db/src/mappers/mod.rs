//! Entity <-> model mappers
//!
//! `From<Model> for Entity` turns database rows into domain objects. Writes
//! bind entity fields directly, so there are no insert structs.

mod prayer_chain;
mod prayer_request;

pub use prayer_chain::raw_ids;
pub use prayer_request::log_with_request;
