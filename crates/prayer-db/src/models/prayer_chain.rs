//! Prayer chain, membership, and commitment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for prayer_chains table
#[derive(Debug, Clone, FromRow)]
pub struct PrayerChainModel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_by_user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ChainMemberModel {
    pub id: i64,
    pub chain_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct PrayerCommitmentModel {
    pub id: i64,
    pub chain_id: i64,
    pub member_id: i64,
    pub pray_for_user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of `SELECT chain_id, COUNT(*) ... GROUP BY chain_id`
#[derive(Debug, Clone, FromRow)]
pub struct ChainMemberCountModel {
    pub chain_id: i64,
    pub member_count: i64,
}
