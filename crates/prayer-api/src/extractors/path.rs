//! Path parameter extractors
//!
//! Path segments arrive as strings and are parsed into Snowflake IDs so a
//! malformed ID yields a 400 with a named parameter.

use prayer_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("invalid {name} format")))
}

/// `/:id` on prayer request and prayer chain routes
#[derive(Debug, Deserialize)]
pub struct IdPath {
    pub id: String,
}

impl IdPath {
    pub fn id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.id, "id")
    }
}

/// `/prayer-chains/:id/commit/:user_id`
#[derive(Debug, Deserialize)]
pub struct CommitmentPath {
    pub id: String,
    pub user_id: String,
}

impl CommitmentPath {
    pub fn chain_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.id, "id")
    }

    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}
