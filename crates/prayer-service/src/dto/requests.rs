//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use prayer_core::Snowflake;
use serde::Deserialize;
use validator::Validate;

fn default_anonymous() -> bool {
    true
}

// ============================================================================
// Prayer Request Requests
// ============================================================================

/// Create prayer request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePrayerRequestRequest {
    #[validate(length(min = 1, max = 2000, message = "Request must be 1-2000 characters"))]
    pub request: String,

    /// Requests are anonymous unless the author opts out
    #[serde(default = "default_anonymous")]
    pub is_anonymous: bool,
}

/// Update prayer request; replaces text and anonymity flag
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePrayerRequestRequest {
    #[validate(length(min = 1, max = 2000, message = "Request must be 1-2000 characters"))]
    pub request: String,

    /// Keeps the current flag when omitted
    pub is_anonymous: Option<bool>,
}

/// Mark a prayer request as answered
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MarkAnsweredRequest {
    #[validate(length(min = 1, max = 5000, message = "Testimony must be 1-5000 characters"))]
    pub testimony: String,
}

// ============================================================================
// Prayer Chain Requests
// ============================================================================

/// Create prayer chain
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePrayerChainRequest {
    #[validate(length(min = 1, max = 100, message = "Chain name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Update prayer chain
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePrayerChainRequest {
    #[validate(length(min = 1, max = 100, message = "Chain name must be 1-100 characters"))]
    pub name: String,

    /// `null` or omitted clears the description
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Commit to pray for another chain member
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommitToPrayRequest {
    pub chain_id: Snowflake,
    pub pray_for_user_id: Snowflake,
}
