//! Chain member entity - a user's membership in a prayer chain

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Junction between a user and a chain; unique per (chain, user)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainMember {
    pub id: Snowflake,
    pub chain_id: Snowflake,
    pub user_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChainMember {
    pub fn new(id: Snowflake, chain_id: Snowflake, user_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            chain_id,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}
