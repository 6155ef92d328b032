//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs, plus
//! the assembly of the decorated chain read-model.

use std::collections::HashMap;

use prayer_core::entities::{
    ChainMember, PrayerChain, PrayerCommitment, PrayerLog, PrayerRequest, UserSummary,
};
use prayer_core::Snowflake;

use super::responses::{
    ChainMemberResponse, PrayerChainDetailResponse, PrayerChainResponse, PrayerCommitmentResponse,
    PrayerLogResponse, PrayerRequestResponse, UserSummaryResponse,
};

// ============================================================================
// Prayer Request Mappers
// ============================================================================

impl From<&PrayerRequest> for PrayerRequestResponse {
    fn from(request: &PrayerRequest) -> Self {
        Self {
            id: request.id.to_string(),
            request: request.request.clone(),
            is_anonymous: request.is_anonymous,
            prayer_count: request.prayer_count,
            status: request.status,
            answered_at: request.answered_at,
            answer_testimony: request.answer_testimony.clone(),
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

impl From<PrayerRequest> for PrayerRequestResponse {
    fn from(request: PrayerRequest) -> Self {
        Self::from(&request)
    }
}

impl PrayerLogResponse {
    pub fn new(log: &PrayerLog, request: Option<&PrayerRequest>) -> Self {
        Self {
            id: log.id.to_string(),
            prayer_request_id: log.prayer_request_id.to_string(),
            user_id: log.user_id.to_string(),
            prayed_at: log.prayed_at,
            prayer_request: request.map(PrayerRequestResponse::from),
        }
    }
}

impl From<&PrayerLog> for PrayerLogResponse {
    fn from(log: &PrayerLog) -> Self {
        Self::new(log, None)
    }
}

// ============================================================================
// Prayer Chain Mappers
// ============================================================================

impl PrayerChainResponse {
    pub fn new(chain: &PrayerChain, member_count: i64) -> Self {
        Self {
            id: chain.id.to_string(),
            name: chain.name.clone(),
            description: chain.description.clone(),
            created_by_user_id: chain.created_by_user_id.to_string(),
            member_count,
            created_at: chain.created_at,
            updated_at: chain.updated_at,
        }
    }
}

impl PrayerCommitmentResponse {
    pub fn new(commitment: &PrayerCommitment, pray_for_user: Option<UserSummaryResponse>) -> Self {
        Self {
            id: commitment.id.to_string(),
            chain_id: commitment.chain_id.to_string(),
            member_id: commitment.member_id.to_string(),
            pray_for_user_id: commitment.pray_for_user_id.to_string(),
            pray_for_user,
            created_at: commitment.created_at,
        }
    }
}

impl From<&PrayerCommitment> for PrayerCommitmentResponse {
    fn from(commitment: &PrayerCommitment) -> Self {
        Self::new(commitment, None)
    }
}

impl From<&UserSummary> for UserSummaryResponse {
    fn from(user: &UserSummary) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

// ============================================================================
// Chain Detail Assembly
// ============================================================================

/// Users resolved by one batched lookup, keyed by ID
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<Snowflake, UserSummary>,
}

impl UserDirectory {
    pub fn new(users: Vec<UserSummary>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        }
    }

    /// Directory that decorates nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, id: Snowflake) -> Option<UserSummaryResponse> {
        self.users.get(&id).map(UserSummaryResponse::from)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl PrayerChainDetailResponse {
    /// Assemble the read-model from rows fetched in bulk.
    ///
    /// Commitments are grouped under the member that made them; members keep
    /// the order they were given in.
    pub fn assemble(
        chain: &PrayerChain,
        members: &[ChainMember],
        commitments: &[PrayerCommitment],
        users: &UserDirectory,
    ) -> Self {
        let mut by_member: HashMap<Snowflake, Vec<PrayerCommitmentResponse>> = HashMap::new();
        for commitment in commitments {
            by_member
                .entry(commitment.member_id)
                .or_default()
                .push(PrayerCommitmentResponse::new(
                    commitment,
                    users.get(commitment.pray_for_user_id),
                ));
        }

        let members: Vec<ChainMemberResponse> = members
            .iter()
            .map(|member| ChainMemberResponse {
                id: member.id.to_string(),
                user_id: member.user_id.to_string(),
                user: users.get(member.user_id),
                commitments: by_member.remove(&member.id).unwrap_or_default(),
                joined_at: member.created_at,
            })
            .collect();

        Self {
            id: chain.id.to_string(),
            name: chain.name.clone(),
            description: chain.description.clone(),
            created_by_user_id: chain.created_by_user_id.to_string(),
            creator: users.get(chain.created_by_user_id),
            member_count: members.len() as i64,
            members,
            created_at: chain.created_at,
            updated_at: chain.updated_at,
        }
    }
}
