//! Response DTOs for API endpoints
//!
//! IDs are rendered as strings. Identity decorations (`creator`, `user`,
//! `pray_for_user`) are omitted when the user lookup did not return them.

use chrono::{DateTime, Utc};
use prayer_core::PrayerStatus;
use serde::Serialize;

// ============================================================================
// Prayer Request Responses
// ============================================================================

/// Prayer request as shown to any authenticated user.
///
/// The author's ID is never exposed.
#[derive(Debug, Clone, Serialize)]
pub struct PrayerRequestResponse {
    pub id: String,
    pub request: String,
    pub is_anonymous: bool,
    pub prayer_count: i32,
    pub status: PrayerStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answered_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_testimony: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One "I prayed" record
#[derive(Debug, Clone, Serialize)]
pub struct PrayerLogResponse {
    pub id: String,
    pub prayer_request_id: String,
    pub user_id: String,
    pub prayed_at: DateTime<Utc>,
    /// Present when the request is still live
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prayer_request: Option<PrayerRequestResponse>,
}

// ============================================================================
// Prayer Chain Responses
// ============================================================================

/// Chain summary used by list endpoints
#[derive(Debug, Clone, Serialize)]
pub struct PrayerChainResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_by_user_id: String,
    pub member_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fully decorated chain read-model
#[derive(Debug, Clone, Serialize)]
pub struct PrayerChainDetailResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_by_user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<UserSummaryResponse>,
    pub member_count: i64,
    pub members: Vec<ChainMemberResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChainMemberResponse {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummaryResponse>,
    pub commitments: Vec<PrayerCommitmentResponse>,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrayerCommitmentResponse {
    pub id: String,
    pub chain_id: String,
    pub member_id: String,
    pub pray_for_user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pray_for_user: Option<UserSummaryResponse>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// User Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummaryResponse {
    pub id: String,
    pub username: String,
    pub email: String,
}

// ============================================================================
// Generic Responses
// ============================================================================

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy {
                "ready"
            } else {
                "not_ready"
            }
            .to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy {
                    "healthy"
                } else {
                    "unhealthy"
                }
                .to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
