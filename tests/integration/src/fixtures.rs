//! Test fixtures and data generators
//!
//! Request bodies sent by the integration tests and the subset of each
//! response body the tests inspect.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreatePrayerRequest {
    pub request: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_anonymous: Option<bool>,
}

impl CreatePrayerRequest {
    pub fn new(request: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            is_anonymous: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkAnswered {
    pub testimony: String,
}

#[derive(Debug, Serialize)]
pub struct CreatePrayerChain {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreatePrayerChain {
    pub fn unique() -> Self {
        Self {
            name: format!("Chain {}", unique_suffix()),
            description: Some("Integration test chain".to_string()),
        }
    }
}

/// IDs go over the wire as strings
#[derive(Debug, Serialize)]
pub struct CommitToPray {
    pub chain_id: String,
    pub pray_for_user_id: String,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PrayerRequestBody {
    pub id: String,
    pub request: String,
    pub is_anonymous: bool,
    pub prayer_count: i32,
    pub status: String,
    pub answer_testimony: Option<String>,
    pub answered_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PrayerLogBody {
    pub id: String,
    pub prayer_request_id: String,
    pub user_id: String,
    pub prayer_request: Option<PrayerRequestBody>,
}

#[derive(Debug, Deserialize)]
pub struct PrayerChainBody {
    pub id: String,
    pub name: String,
    pub created_by_user_id: String,
    pub member_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct UserSummaryBody {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct CommitmentBody {
    pub id: String,
    pub chain_id: String,
    pub member_id: String,
    pub pray_for_user_id: String,
    pub pray_for_user: Option<UserSummaryBody>,
}

#[derive(Debug, Deserialize)]
pub struct ChainMemberBody {
    pub user_id: String,
    pub user: Option<UserSummaryBody>,
    pub commitments: Vec<CommitmentBody>,
}

#[derive(Debug, Deserialize)]
pub struct ChainDetailBody {
    pub id: String,
    pub creator: Option<UserSummaryBody>,
    pub member_count: i64,
    pub members: Vec<ChainMemberBody>,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}
