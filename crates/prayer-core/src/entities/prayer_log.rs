//! Prayer log entity - one user praying for one request

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Immutable record that `user_id` prayed for `prayer_request_id`.
/// At most one exists per (request, user) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerLog {
    pub id: Snowflake,
    pub prayer_request_id: Snowflake,
    pub user_id: Snowflake,
    pub prayed_at: DateTime<Utc>,
}

impl PrayerLog {
    pub fn new(id: Snowflake, prayer_request_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            id,
            prayer_request_id,
            user_id,
            prayed_at: Utc::now(),
        }
    }
}
