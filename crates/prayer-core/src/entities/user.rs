//! Read-only identity data owned by the account service

use crate::value_objects::Snowflake;

/// Identity decoration attached to chain members and commitment targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
}
