//! Prayer commitment entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// A chain member's promise to pray for another member of the same chain.
///
/// `member_id` references the committer's [`ChainMember`](super::ChainMember)
/// row, `pray_for_user_id` the target user. Unique per
/// (chain, member, target); never self-referential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerCommitment {
    pub id: Snowflake,
    pub chain_id: Snowflake,
    pub member_id: Snowflake,
    pub pray_for_user_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PrayerCommitment {
    pub fn new(
        id: Snowflake,
        chain_id: Snowflake,
        member_id: Snowflake,
        pray_for_user_id: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            chain_id,
            member_id,
            pray_for_user_id,
            created_at: now,
            updated_at: now,
        }
    }
}
