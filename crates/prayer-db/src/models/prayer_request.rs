//! Prayer request and prayer log database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for prayer_requests table
#[derive(Debug, Clone, FromRow)]
pub struct PrayerRequestModel {
    pub id: i64,
    pub user_id: i64,
    pub request: String,
    pub is_anonymous: bool,
    pub prayer_count: i32,
    pub status: String,
    pub answered_at: Option<DateTime<Utc>>,
    pub answer_testimony: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for prayer_logs table
#[derive(Debug, Clone, FromRow)]
pub struct PrayerLogModel {
    pub id: i64,
    pub prayer_request_id: i64,
    pub user_id: i64,
    pub prayed_at: DateTime<Utc>,
}

/// A prayer log LEFT JOINed with its (possibly deleted) request.
/// The `r_*` columns are all NULL when the request is gone.
#[derive(Debug, Clone, FromRow)]
pub struct PrayerLogWithRequestModel {
    pub id: i64,
    pub prayer_request_id: i64,
    pub user_id: i64,
    pub prayed_at: DateTime<Utc>,
    pub r_id: Option<i64>,
    pub r_user_id: Option<i64>,
    pub r_request: Option<String>,
    pub r_is_anonymous: Option<bool>,
    pub r_prayer_count: Option<i32>,
    pub r_status: Option<String>,
    pub r_answered_at: Option<DateTime<Utc>>,
    pub r_answer_testimony: Option<String>,
    pub r_created_at: Option<DateTime<Utc>>,
    pub r_updated_at: Option<DateTime<Utc>>,
}
