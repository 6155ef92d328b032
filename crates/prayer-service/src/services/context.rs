//! Service context - dependency container for services
//!
//! Holds every repository the prayer services need plus the ID generator.
//! The context is storage-agnostic: the API wires in the PostgreSQL
//! repositories, tests wire in the in-memory store.

use std::sync::Arc;

use prayer_core::traits::{
    ChainMemberRepository, CommitmentRepository, PrayerChainRepository, PrayerLogRepository,
    PrayerRequestRepository, UserRepository,
};
use prayer_core::{Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    prayer_request_repo: Arc<dyn PrayerRequestRepository>,
    prayer_log_repo: Arc<dyn PrayerLogRepository>,
    prayer_chain_repo: Arc<dyn PrayerChainRepository>,
    chain_member_repo: Arc<dyn ChainMemberRepository>,
    commitment_repo: Arc<dyn CommitmentRepository>,
    user_repo: Arc<dyn UserRepository>,

    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        prayer_request_repo: Arc<dyn PrayerRequestRepository>,
        prayer_log_repo: Arc<dyn PrayerLogRepository>,
        prayer_chain_repo: Arc<dyn PrayerChainRepository>,
        chain_member_repo: Arc<dyn ChainMemberRepository>,
        commitment_repo: Arc<dyn CommitmentRepository>,
        user_repo: Arc<dyn UserRepository>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            prayer_request_repo,
            prayer_log_repo,
            prayer_chain_repo,
            chain_member_repo,
            commitment_repo,
            user_repo,
            snowflake_generator,
        }
    }

    // === Repositories ===

    pub fn prayer_request_repo(&self) -> &dyn PrayerRequestRepository {
        self.prayer_request_repo.as_ref()
    }

    pub fn prayer_log_repo(&self) -> &dyn PrayerLogRepository {
        self.prayer_log_repo.as_ref()
    }

    pub fn prayer_chain_repo(&self) -> &dyn PrayerChainRepository {
        self.prayer_chain_repo.as_ref()
    }

    pub fn chain_member_repo(&self) -> &dyn ChainMemberRepository {
        self.chain_member_repo.as_ref()
    }

    pub fn commitment_repo(&self) -> &dyn CommitmentRepository {
        self.commitment_repo.as_ref()
    }

    /// Read-only user lookups, used to decorate chain details
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    // === IDs ===

    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    prayer_request_repo: Option<Arc<dyn PrayerRequestRepository>>,
    prayer_log_repo: Option<Arc<dyn PrayerLogRepository>>,
    prayer_chain_repo: Option<Arc<dyn PrayerChainRepository>>,
    chain_member_repo: Option<Arc<dyn ChainMemberRepository>>,
    commitment_repo: Option<Arc<dyn CommitmentRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prayer_request_repo(mut self, repo: Arc<dyn PrayerRequestRepository>) -> Self {
        self.prayer_request_repo = Some(repo);
        self
    }

    pub fn prayer_log_repo(mut self, repo: Arc<dyn PrayerLogRepository>) -> Self {
        self.prayer_log_repo = Some(repo);
        self
    }

    pub fn prayer_chain_repo(mut self, repo: Arc<dyn PrayerChainRepository>) -> Self {
        self.prayer_chain_repo = Some(repo);
        self
    }

    pub fn chain_member_repo(mut self, repo: Arc<dyn ChainMemberRepository>) -> Self {
        self.chain_member_repo = Some(repo);
        self
    }

    pub fn commitment_repo(mut self, repo: Arc<dyn CommitmentRepository>) -> Self {
        self.commitment_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any repository is missing. A
    /// missing generator falls back to worker 0.
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.prayer_request_repo
                .ok_or_else(|| ServiceError::validation("prayer_request_repo is required"))?,
            self.prayer_log_repo
                .ok_or_else(|| ServiceError::validation("prayer_log_repo is required"))?,
            self.prayer_chain_repo
                .ok_or_else(|| ServiceError::validation("prayer_chain_repo is required"))?,
            self.chain_member_repo
                .ok_or_else(|| ServiceError::validation("chain_member_repo is required"))?,
            self.commitment_repo
                .ok_or_else(|| ServiceError::validation("commitment_repo is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.snowflake_generator.unwrap_or_default(),
        ))
    }
}
