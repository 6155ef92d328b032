//! In-memory repositories for tests
//!
//! [`InMemoryStore`] implements every repository trait over one mutex-guarded
//! state and enforces the same uniqueness and cascade rules as the
//! PostgreSQL schema, so service behaviour can be tested without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use prayer_core::entities::{
    ChainMember, PrayerChain, PrayerCommitment, PrayerLog, PrayerRequest, UserSummary,
};
use prayer_core::traits::{
    ChainMemberRepository, CommitmentRepository, PrayerChainRepository, PrayerLogRepository,
    PrayerRequestRepository, RepoResult, UserRepository,
};
use prayer_core::{DomainError, PrayerStatus, Snowflake, SnowflakeGenerator};

use crate::services::ServiceContext;

#[derive(Default)]
struct State {
    /// Soft-deleted rows stay with `true`
    requests: HashMap<Snowflake, (PrayerRequest, bool)>,
    logs: Vec<PrayerLog>,
    chains: HashMap<Snowflake, (PrayerChain, bool)>,
    members: Vec<ChainMember>,
    commitments: Vec<PrayerCommitment>,
    users: HashMap<Snowflake, UserSummary>,
}

impl State {
    fn live_request(&self, id: Snowflake) -> Option<&PrayerRequest> {
        self.requests
            .get(&id)
            .and_then(|(r, deleted)| (!deleted).then_some(r))
    }

    fn live_chain(&self, id: Snowflake) -> Option<&PrayerChain> {
        self.chains
            .get(&id)
            .and_then(|(c, deleted)| (!deleted).then_some(c))
    }

    fn is_member(&self, chain_id: Snowflake, user_id: Snowflake) -> bool {
        self.members
            .iter()
            .any(|m| m.chain_id == chain_id && m.user_id == user_id)
    }
}

/// Shared in-memory backing store for every repository trait
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    fail_user_lookups: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a user in the read-only identity table
    pub fn add_user(&self, id: Snowflake, username: &str) -> UserSummary {
        let user = UserSummary {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
        };
        self.state.lock().users.insert(id, user.clone());
        user
    }

    /// Make every subsequent user lookup fail with a storage error
    pub fn fail_user_lookups(&self, fail: bool) {
        self.fail_user_lookups.store(fail, Ordering::SeqCst);
    }

    /// Raw request row, including soft-deleted ones
    pub fn request_row(&self, id: Snowflake) -> Option<PrayerRequest> {
        self.state.lock().requests.get(&id).map(|(r, _)| r.clone())
    }

    pub fn log_count(&self, prayer_request_id: Snowflake) -> usize {
        self.state
            .lock()
            .logs
            .iter()
            .filter(|l| l.prayer_request_id == prayer_request_id)
            .count()
    }

    pub fn member_count(&self, chain_id: Snowflake) -> usize {
        self.state
            .lock()
            .members
            .iter()
            .filter(|m| m.chain_id == chain_id)
            .count()
    }

    pub fn commitments_in(&self, chain_id: Snowflake) -> Vec<PrayerCommitment> {
        self.state
            .lock()
            .commitments
            .iter()
            .filter(|c| c.chain_id == chain_id)
            .cloned()
            .collect()
    }
}

/// A [`ServiceContext`] whose repositories all point at `store`
pub fn service_context(store: &Arc<InMemoryStore>) -> ServiceContext {
    ServiceContext::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(SnowflakeGenerator::default()),
    )
}

/// Fresh store plus a context wired to it
pub fn test_context() -> (Arc<InMemoryStore>, ServiceContext) {
    let store = InMemoryStore::new();
    let ctx = service_context(&store);
    (store, ctx)
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, Snowflake)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

// ============================================================================
// Prayer Requests
// ============================================================================

#[async_trait]
impl PrayerRequestRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<PrayerRequest>> {
        Ok(self.state.lock().live_request(id).cloned())
    }

    async fn find_all(&self) -> RepoResult<Vec<PrayerRequest>> {
        let state = self.state.lock();
        let mut out: Vec<_> = state
            .requests
            .values()
            .filter(|(_, deleted)| !deleted)
            .map(|(r, _)| r.clone())
            .collect();
        newest_first(&mut out, |r| (r.created_at, r.id));
        Ok(out)
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<PrayerRequest>> {
        let mut out = PrayerRequestRepository::find_all(self).await?;
        out.retain(|r| r.user_id == user_id);
        Ok(out)
    }

    async fn find_answered(&self) -> RepoResult<Vec<PrayerRequest>> {
        let mut out = PrayerRequestRepository::find_all(self).await?;
        out.retain(|r| r.status == PrayerStatus::Answered);
        newest_first(&mut out, |r| (r.answered_at.unwrap_or(r.created_at), r.id));
        Ok(out)
    }

    async fn create(&self, request: &PrayerRequest) -> RepoResult<()> {
        self.state
            .lock()
            .requests
            .insert(request.id, (request.clone(), false));
        Ok(())
    }

    async fn update(&self, request: &PrayerRequest) -> RepoResult<()> {
        let mut state = self.state.lock();
        match state.requests.get_mut(&request.id) {
            Some((row, false)) => {
                row.request.clone_from(&request.request);
                row.is_anonymous = request.is_anonymous;
                row.updated_at = request.updated_at;
                Ok(())
            }
            _ => Err(DomainError::PrayerRequestNotFound(request.id)),
        }
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        match self.state.lock().requests.get_mut(&id) {
            Some((_, deleted)) if !*deleted => {
                *deleted = true;
                Ok(())
            }
            _ => Err(DomainError::PrayerRequestNotFound(id)),
        }
    }

    async fn mark_answered(
        &self,
        id: Snowflake,
        testimony: &str,
        answered_at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        let mut state = self.state.lock();
        match state.requests.get_mut(&id) {
            Some((row, false)) if row.status == PrayerStatus::Pending => {
                row.status = PrayerStatus::Answered;
                row.answered_at = Some(answered_at);
                row.answer_testimony = Some(testimony.to_string());
                row.updated_at = answered_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// ============================================================================
// Prayer Logs
// ============================================================================

#[async_trait]
impl PrayerLogRepository for InMemoryStore {
    async fn exists(&self, prayer_request_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self
            .state
            .lock()
            .logs
            .iter()
            .any(|l| l.prayer_request_id == prayer_request_id && l.user_id == user_id))
    }

    async fn record(&self, log: &PrayerLog) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state
            .logs
            .iter()
            .any(|l| l.prayer_request_id == log.prayer_request_id && l.user_id == log.user_id)
        {
            return Err(DomainError::AlreadyPrayed);
        }
        match state.requests.get_mut(&log.prayer_request_id) {
            Some((row, false)) => row.prayer_count += 1,
            _ => return Err(DomainError::PrayerRequestNotFound(log.prayer_request_id)),
        }
        state.logs.push(log.clone());
        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: Snowflake,
    ) -> RepoResult<Vec<(PrayerLog, Option<PrayerRequest>)>> {
        let state = self.state.lock();
        let mut logs: Vec<_> = state
            .logs
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut logs, |l| (l.prayed_at, l.id));
        Ok(logs
            .into_iter()
            .map(|l| {
                let request = state.live_request(l.prayer_request_id).cloned();
                (l, request)
            })
            .collect())
    }

    async fn find_by_request(&self, prayer_request_id: Snowflake) -> RepoResult<Vec<PrayerLog>> {
        let mut logs: Vec<_> = self
            .state
            .lock()
            .logs
            .iter()
            .filter(|l| l.prayer_request_id == prayer_request_id)
            .cloned()
            .collect();
        newest_first(&mut logs, |l| (l.prayed_at, l.id));
        Ok(logs)
    }
}

// ============================================================================
// Prayer Chains
// ============================================================================

#[async_trait]
impl PrayerChainRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<PrayerChain>> {
        Ok(self.state.lock().live_chain(id).cloned())
    }

    async fn find_all(&self) -> RepoResult<Vec<PrayerChain>> {
        let state = self.state.lock();
        let mut out: Vec<_> = state
            .chains
            .values()
            .filter(|(_, deleted)| !deleted)
            .map(|(c, _)| c.clone())
            .collect();
        newest_first(&mut out, |c| (c.created_at, c.id));
        Ok(out)
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<PrayerChain>> {
        let mut out = PrayerChainRepository::find_all(self).await?;
        let state = self.state.lock();
        out.retain(|c| state.is_member(c.id, user_id));
        Ok(out)
    }

    async fn create_with_creator(
        &self,
        chain: &PrayerChain,
        creator: &ChainMember,
    ) -> RepoResult<()> {
        let mut state = self.state.lock();
        state.chains.insert(chain.id, (chain.clone(), false));
        state.members.push(creator.clone());
        Ok(())
    }

    async fn update(&self, chain: &PrayerChain) -> RepoResult<()> {
        match self.state.lock().chains.get_mut(&chain.id) {
            Some((row, false)) => {
                row.name.clone_from(&chain.name);
                row.description.clone_from(&chain.description);
                row.updated_at = chain.updated_at;
                Ok(())
            }
            _ => Err(DomainError::PrayerChainNotFound(chain.id)),
        }
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        match self.state.lock().chains.get_mut(&id) {
            Some((_, deleted)) if !*deleted => {
                *deleted = true;
                Ok(())
            }
            _ => Err(DomainError::PrayerChainNotFound(id)),
        }
    }
}

// ============================================================================
// Chain Members
// ============================================================================

#[async_trait]
impl ChainMemberRepository for InMemoryStore {
    async fn find(
        &self,
        chain_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<ChainMember>> {
        Ok(self
            .state
            .lock()
            .members
            .iter()
            .find(|m| m.chain_id == chain_id && m.user_id == user_id)
            .cloned())
    }

    async fn find_by_chain(&self, chain_id: Snowflake) -> RepoResult<Vec<ChainMember>> {
        let mut out: Vec<_> = self
            .state
            .lock()
            .members
            .iter()
            .filter(|m| m.chain_id == chain_id)
            .cloned()
            .collect();
        out.sort_by_key(|m| (m.created_at, m.id));
        Ok(out)
    }

    async fn is_member(&self, chain_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self.state.lock().is_member(chain_id, user_id))
    }

    async fn create(&self, member: &ChainMember) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.is_member(member.chain_id, member.user_id) {
            return Err(DomainError::AlreadyMember);
        }
        state.members.push(member.clone());
        Ok(())
    }

    async fn delete(&self, chain_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let mut state = self.state.lock();
        let Some(pos) = state
            .members
            .iter()
            .position(|m| m.chain_id == chain_id && m.user_id == user_id)
        else {
            return Ok(false);
        };
        let member = state.members.remove(pos);
        state.commitments.retain(|c| {
            c.chain_id != chain_id || (c.member_id != member.id && c.pray_for_user_id != user_id)
        });
        Ok(true)
    }

    async fn count_by_chains(&self, chain_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, i64)>> {
        let state = self.state.lock();
        Ok(chain_ids
            .iter()
            .filter_map(|id| {
                let n = state.members.iter().filter(|m| m.chain_id == *id).count();
                (n > 0).then_some((*id, n as i64))
            })
            .collect())
    }
}

// ============================================================================
// Commitments
// ============================================================================

#[async_trait]
impl CommitmentRepository for InMemoryStore {
    async fn exists(
        &self,
        chain_id: Snowflake,
        member_id: Snowflake,
        pray_for_user_id: Snowflake,
    ) -> RepoResult<bool> {
        Ok(self.state.lock().commitments.iter().any(|c| {
            c.chain_id == chain_id
                && c.member_id == member_id
                && c.pray_for_user_id == pray_for_user_id
        }))
    }

    async fn create(&self, commitment: &PrayerCommitment) -> RepoResult<()> {
        let mut state = self.state.lock();
        if !state.is_member(commitment.chain_id, commitment.pray_for_user_id) {
            return Err(DomainError::TargetNotMember);
        }
        if state.commitments.iter().any(|c| {
            c.chain_id == commitment.chain_id
                && c.member_id == commitment.member_id
                && c.pray_for_user_id == commitment.pray_for_user_id
        }) {
            return Err(DomainError::DuplicateCommitment);
        }
        state.commitments.push(commitment.clone());
        Ok(())
    }

    async fn delete(
        &self,
        chain_id: Snowflake,
        member_id: Snowflake,
        pray_for_user_id: Snowflake,
    ) -> RepoResult<u64> {
        let mut state = self.state.lock();
        let before = state.commitments.len();
        state.commitments.retain(|c| {
            !(c.chain_id == chain_id
                && c.member_id == member_id
                && c.pray_for_user_id == pray_for_user_id)
        });
        Ok((before - state.commitments.len()) as u64)
    }

    async fn find_by_chain(&self, chain_id: Snowflake) -> RepoResult<Vec<PrayerCommitment>> {
        let mut out = self.commitments_in(chain_id);
        out.sort_by_key(|c| (c.created_at, c.id));
        Ok(out)
    }
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<UserSummary>> {
        if self.fail_user_lookups.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError(
                "user lookup unavailable".to_string(),
            ));
        }
        Ok(self.state.lock().users.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<UserSummary>> {
        if self.fail_user_lookups.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError(
                "user lookup unavailable".to_string(),
            ));
        }
        let state = self.state.lock();
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }
}
