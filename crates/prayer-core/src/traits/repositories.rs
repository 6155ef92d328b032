//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer states what it needs; `prayer-db` provides the
//! PostgreSQL implementation. Uniqueness rules documented on each method are
//! storage-level guarantees, so implementations must enforce them even when
//! two callers race past the service-level checks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    ChainMember, PrayerChain, PrayerCommitment, PrayerLog, PrayerRequest, UserSummary,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Prayer Request Repository
// ============================================================================

#[async_trait]
pub trait PrayerRequestRepository: Send + Sync {
    /// Find a live (not deleted) request by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<PrayerRequest>>;

    /// All live requests, newest first
    async fn find_all(&self) -> RepoResult<Vec<PrayerRequest>>;

    /// Requests owned by a user, newest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<PrayerRequest>>;

    /// Answered requests, most recently answered first
    async fn find_answered(&self) -> RepoResult<Vec<PrayerRequest>>;

    async fn create(&self, request: &PrayerRequest) -> RepoResult<()>;

    /// Persist text and anonymity changes
    async fn update(&self, request: &PrayerRequest) -> RepoResult<()>;

    /// Soft delete
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Atomically move a pending request to answered.
    ///
    /// Returns `false` when the request was not pending at write time.
    async fn mark_answered(
        &self,
        id: Snowflake,
        testimony: &str,
        answered_at: DateTime<Utc>,
    ) -> RepoResult<bool>;
}

// ============================================================================
// Prayer Log Repository
// ============================================================================

#[async_trait]
pub trait PrayerLogRepository: Send + Sync {
    /// Check whether a user already prayed for a request
    async fn exists(&self, prayer_request_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Insert the log and increment the request's `prayer_count` as one unit.
    ///
    /// A second log for the same (request, user) fails with
    /// [`DomainError::AlreadyPrayed`] and leaves the count untouched.
    async fn record(&self, log: &PrayerLog) -> RepoResult<()>;

    /// A user's logs, newest `prayed_at` first, each with its request if still live
    async fn find_by_user(
        &self,
        user_id: Snowflake,
    ) -> RepoResult<Vec<(PrayerLog, Option<PrayerRequest>)>>;

    /// Logs for one request, newest first
    async fn find_by_request(&self, prayer_request_id: Snowflake) -> RepoResult<Vec<PrayerLog>>;
}

// ============================================================================
// Prayer Chain Repository
// ============================================================================

#[async_trait]
pub trait PrayerChainRepository: Send + Sync {
    /// Find a live chain by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<PrayerChain>>;

    /// All live chains, newest first
    async fn find_all(&self) -> RepoResult<Vec<PrayerChain>>;

    /// Live chains the user is a member of, newest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<PrayerChain>>;

    /// Insert the chain together with its creator's membership row
    async fn create_with_creator(
        &self,
        chain: &PrayerChain,
        creator: &ChainMember,
    ) -> RepoResult<()>;

    async fn update(&self, chain: &PrayerChain) -> RepoResult<()>;

    /// Soft delete
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Chain Member Repository
// ============================================================================

#[async_trait]
pub trait ChainMemberRepository: Send + Sync {
    /// Find membership by chain and user ID
    async fn find(
        &self,
        chain_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<ChainMember>>;

    /// Members of a chain, oldest first
    async fn find_by_chain(&self, chain_id: Snowflake) -> RepoResult<Vec<ChainMember>>;

    async fn is_member(&self, chain_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Add a membership; unique per (chain, user), else [`DomainError::AlreadyMember`]
    async fn create(&self, member: &ChainMember) -> RepoResult<()>;

    /// Remove a membership together with every commitment in that chain
    /// made by or targeting the user. Returns `false` if no membership existed.
    async fn delete(&self, chain_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Member counts for a batch of chains; chains without members are omitted
    async fn count_by_chains(&self, chain_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, i64)>>;
}

// ============================================================================
// Commitment Repository
// ============================================================================

#[async_trait]
pub trait CommitmentRepository: Send + Sync {
    async fn exists(
        &self,
        chain_id: Snowflake,
        member_id: Snowflake,
        pray_for_user_id: Snowflake,
    ) -> RepoResult<bool>;

    /// Insert; unique per (chain, member, target), else
    /// [`DomainError::DuplicateCommitment`]
    async fn create(&self, commitment: &PrayerCommitment) -> RepoResult<()>;

    /// Delete matching commitments, returning how many rows went away
    async fn delete(
        &self,
        chain_id: Snowflake,
        member_id: Snowflake,
        pray_for_user_id: Snowflake,
    ) -> RepoResult<u64>;

    /// Every commitment inside a chain, oldest first
    async fn find_by_chain(&self, chain_id: Snowflake) -> RepoResult<Vec<PrayerCommitment>>;
}

// ============================================================================
// User Repository
// ============================================================================

/// Read-only view of the identity service's `users` table
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<UserSummary>>;

    /// Batched lookup; unknown IDs are silently skipped
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<UserSummary>>;
}
