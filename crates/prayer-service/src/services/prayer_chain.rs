//! Prayer chain service
//!
//! Handles chains, membership, and the commitments members make to pray for
//! one another.

use std::collections::{BTreeSet, HashMap};

use prayer_core::entities::{ChainMember, PrayerChain, PrayerCommitment};
use prayer_core::{DomainError, Snowflake};
use tracing::{debug, info, instrument, warn};

use crate::dto::{
    CommitToPrayRequest, CreatePrayerChainRequest, PrayerChainDetailResponse, PrayerChainResponse,
    PrayerCommitmentResponse, UpdatePrayerChainRequest, UserDirectory,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Prayer chain service
pub struct PrayerChainService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PrayerChainService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a chain; the creator becomes its first member
    #[instrument(skip(self, request))]
    pub async fn create_prayer_chain(
        &self,
        creator_id: Snowflake,
        request: CreatePrayerChainRequest,
    ) -> ServiceResult<PrayerChainResponse> {
        let chain = PrayerChain::new(
            self.ctx.generate_id(),
            request.name,
            request.description,
            creator_id,
        );
        let creator = ChainMember::new(self.ctx.generate_id(), chain.id, creator_id);

        self.ctx
            .prayer_chain_repo()
            .create_with_creator(&chain, &creator)
            .await?;

        info!(chain_id = %chain.id, creator_id = %creator_id, "Prayer chain created");

        Ok(PrayerChainResponse::new(&chain, 1))
    }

    /// Chain summary with its member count
    #[instrument(skip(self))]
    pub async fn get_prayer_chain(
        &self,
        chain_id: Snowflake,
    ) -> ServiceResult<PrayerChainResponse> {
        let chain = self.find_chain(chain_id).await?;
        self.summarize_one(&chain).await
    }

    /// All live chains, newest first
    #[instrument(skip(self))]
    pub async fn list_prayer_chains(&self) -> ServiceResult<Vec<PrayerChainResponse>> {
        let chains = self.ctx.prayer_chain_repo().find_all().await?;
        self.summarize(chains).await
    }

    /// Chains the user belongs to, newest first
    #[instrument(skip(self))]
    pub async fn list_user_prayer_chains(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<PrayerChainResponse>> {
        let chains = self.ctx.prayer_chain_repo().find_by_user(user_id).await?;
        self.summarize(chains).await
    }

    /// Rename or re-describe a chain; creator only
    #[instrument(skip(self, request))]
    pub async fn update_prayer_chain(
        &self,
        chain_id: Snowflake,
        user_id: Snowflake,
        request: UpdatePrayerChainRequest,
    ) -> ServiceResult<PrayerChainResponse> {
        let mut chain = self.find_created_chain(chain_id, user_id).await?;

        chain.set_details(request.name, request.description);
        self.ctx.prayer_chain_repo().update(&chain).await?;

        info!(chain_id = %chain_id, "Prayer chain updated");

        self.summarize_one(&chain).await
    }

    /// Soft delete a chain; creator only
    #[instrument(skip(self))]
    pub async fn delete_prayer_chain(
        &self,
        chain_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        self.find_created_chain(chain_id, user_id).await?;

        self.ctx.prayer_chain_repo().delete(chain_id).await?;

        info!(chain_id = %chain_id, user_id = %user_id, "Prayer chain deleted");

        Ok(())
    }

    /// Add the user to a chain
    #[instrument(skip(self))]
    pub async fn join_chain(&self, user_id: Snowflake, chain_id: Snowflake) -> ServiceResult<()> {
        self.find_chain(chain_id).await?;

        if self
            .ctx
            .chain_member_repo()
            .is_member(chain_id, user_id)
            .await?
        {
            return Err(DomainError::AlreadyMember.into());
        }

        let member = ChainMember::new(self.ctx.generate_id(), chain_id, user_id);
        self.ctx.chain_member_repo().create(&member).await?;

        info!(chain_id = %chain_id, user_id = %user_id, "Joined prayer chain");

        Ok(())
    }

    /// Remove the user from a chain.
    ///
    /// Commitments the user made in the chain, and commitments other members
    /// made to pray for the user, are removed with the membership.
    #[instrument(skip(self))]
    pub async fn leave_chain(&self, user_id: Snowflake, chain_id: Snowflake) -> ServiceResult<()> {
        self.find_chain(chain_id).await?;

        if !self
            .ctx
            .chain_member_repo()
            .delete(chain_id, user_id)
            .await?
        {
            return Err(DomainError::NotMember.into());
        }

        info!(chain_id = %chain_id, user_id = %user_id, "Left prayer chain");

        Ok(())
    }

    /// Commit to pray for another member of the same chain.
    ///
    /// Checks run in a fixed order: chain exists, caller is a member, caller
    /// is not the target, target is a member, no duplicate commitment.
    #[instrument(skip(self, request))]
    pub async fn commit_to_pray(
        &self,
        user_id: Snowflake,
        request: CommitToPrayRequest,
    ) -> ServiceResult<PrayerCommitmentResponse> {
        let chain_id = request.chain_id;
        let target_id = request.pray_for_user_id;

        self.find_chain(chain_id).await?;

        let member = self
            .ctx
            .chain_member_repo()
            .find(chain_id, user_id)
            .await?
            .ok_or(DomainError::NotAMember)?;

        if user_id == target_id {
            return Err(DomainError::SelfCommitment.into());
        }

        if !self
            .ctx
            .chain_member_repo()
            .is_member(chain_id, target_id)
            .await?
        {
            return Err(DomainError::TargetNotMember.into());
        }

        if self
            .ctx
            .commitment_repo()
            .exists(chain_id, member.id, target_id)
            .await?
        {
            return Err(DomainError::DuplicateCommitment.into());
        }

        let commitment =
            PrayerCommitment::new(self.ctx.generate_id(), chain_id, member.id, target_id);
        self.ctx.commitment_repo().create(&commitment).await?;

        info!(
            chain_id = %chain_id,
            user_id = %user_id,
            pray_for_user_id = %target_id,
            "Committed to pray"
        );

        Ok(PrayerCommitmentResponse::from(&commitment))
    }

    /// Withdraw a commitment. Removing one that does not exist succeeds.
    #[instrument(skip(self))]
    pub async fn remove_commitment(
        &self,
        user_id: Snowflake,
        chain_id: Snowflake,
        pray_for_user_id: Snowflake,
    ) -> ServiceResult<()> {
        self.find_chain(chain_id).await?;

        let member = self
            .ctx
            .chain_member_repo()
            .find(chain_id, user_id)
            .await?
            .ok_or(DomainError::NotMember)?;

        let removed = self
            .ctx
            .commitment_repo()
            .delete(chain_id, member.id, pray_for_user_id)
            .await?;

        info!(
            chain_id = %chain_id,
            user_id = %user_id,
            pray_for_user_id = %pray_for_user_id,
            removed,
            "Commitment removed"
        );

        Ok(())
    }

    /// Chain with creator, members, and commitments, all decorated with user
    /// identities.
    ///
    /// Uses a fixed number of lookups regardless of member count. A failed
    /// identity lookup is logged and leaves the decorations out.
    #[instrument(skip(self))]
    pub async fn get_chain_with_details(
        &self,
        chain_id: Snowflake,
    ) -> ServiceResult<PrayerChainDetailResponse> {
        let chain = self.find_chain(chain_id).await?;
        let members = self.ctx.chain_member_repo().find_by_chain(chain_id).await?;
        let commitments = self.ctx.commitment_repo().find_by_chain(chain_id).await?;

        let user_ids: Vec<Snowflake> = std::iter::once(chain.created_by_user_id)
            .chain(members.iter().map(|m| m.user_id))
            .chain(commitments.iter().map(|c| c.pray_for_user_id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let users = match self.ctx.user_repo().find_by_ids(&user_ids).await {
            Ok(users) => UserDirectory::new(users),
            Err(e) => {
                warn!(chain_id = %chain_id, error = %e, "User lookup failed; omitting identities");
                UserDirectory::empty()
            }
        };

        debug!(
            chain_id = %chain_id,
            members = members.len(),
            commitments = commitments.len(),
            resolved_users = users.len(),
            "Assembled chain details"
        );

        Ok(PrayerChainDetailResponse::assemble(
            &chain,
            &members,
            &commitments,
            &users,
        ))
    }

    // === Helpers ===

    async fn find_chain(&self, chain_id: Snowflake) -> ServiceResult<PrayerChain> {
        Ok(self
            .ctx
            .prayer_chain_repo()
            .find_by_id(chain_id)
            .await?
            .ok_or(DomainError::PrayerChainNotFound(chain_id))?)
    }

    async fn find_created_chain(
        &self,
        chain_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<PrayerChain> {
        let chain = self.find_chain(chain_id).await?;
        if !chain.is_creator(user_id) {
            return Err(DomainError::NotChainCreator.into());
        }
        Ok(chain)
    }

    async fn summarize_one(&self, chain: &PrayerChain) -> ServiceResult<PrayerChainResponse> {
        let counts = self
            .ctx
            .chain_member_repo()
            .count_by_chains(&[chain.id])
            .await?;
        let count = counts.first().map_or(0, |(_, n)| *n);
        Ok(PrayerChainResponse::new(chain, count))
    }

    /// Attach member counts using one batched count query
    async fn summarize(&self, chains: Vec<PrayerChain>) -> ServiceResult<Vec<PrayerChainResponse>> {
        if chains.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Snowflake> = chains.iter().map(|c| c.id).collect();
        let counts: HashMap<Snowflake, i64> = self
            .ctx
            .chain_member_repo()
            .count_by_chains(&ids)
            .await?
            .into_iter()
            .collect();

        Ok(chains
            .iter()
            .map(|chain| {
                let count = counts.get(&chain.id).copied().unwrap_or(0);
                PrayerChainResponse::new(chain, count)
            })
            .collect())
    }
}
