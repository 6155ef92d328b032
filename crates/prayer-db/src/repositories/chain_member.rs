//! PostgreSQL implementation of ChainMemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use prayer_core::entities::ChainMember;
use prayer_core::error::DomainError;
use prayer_core::traits::{ChainMemberRepository, RepoResult};
use prayer_core::value_objects::Snowflake;

use crate::mappers::raw_ids;
use crate::models::{ChainMemberCountModel, ChainMemberModel};

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ChainMemberRepository
#[derive(Clone)]
pub struct PgChainMemberRepository {
    pool: PgPool,
}

impl PgChainMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChainMemberRepository for PgChainMemberRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        chain_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<ChainMember>> {
        let result = sqlx::query_as::<_, ChainMemberModel>(
            r"
            SELECT id, chain_id, user_id, created_at, updated_at
            FROM chain_members
            WHERE chain_id = $1 AND user_id = $2
            ",
        )
        .bind(chain_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChainMember::from))
    }

    #[instrument(skip(self))]
    async fn find_by_chain(&self, chain_id: Snowflake) -> RepoResult<Vec<ChainMember>> {
        let results = sqlx::query_as::<_, ChainMemberModel>(
            r"
            SELECT id, chain_id, user_id, created_at, updated_at
            FROM chain_members
            WHERE chain_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(chain_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ChainMember::from).collect())
    }

    #[instrument(skip(self))]
    async fn is_member(&self, chain_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM chain_members WHERE chain_id = $1 AND user_id = $2)
            ",
        )
        .bind(chain_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, member), fields(chain_id = %member.chain_id, user_id = %member.user_id))]
    async fn create(&self, member: &ChainMember) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO chain_members (id, chain_id, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(member.id.into_inner())
        .bind(member.chain_id.into_inner())
        .bind(member.user_id.into_inner())
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, chain_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Commitment inserts take KEY SHARE on both the committer's and the
        // target's membership rows, so they serialize behind this lock.
        let member_id = sqlx::query_scalar::<_, i64>(
            r"
            SELECT id FROM chain_members
            WHERE chain_id = $1 AND user_id = $2
            FOR UPDATE
            ",
        )
        .bind(chain_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let Some(member_id) = member_id else {
            return Ok(false);
        };

        let cascaded = sqlx::query(
            r"
            DELETE FROM prayer_commitments
            WHERE chain_id = $1 AND (member_id = $2 OR pray_for_user_id = $3)
            ",
        )
        .bind(chain_id.into_inner())
        .bind(member_id)
        .bind(user_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query("DELETE FROM chain_members WHERE id = $1")
            .bind(member_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(
            commitments_removed = cascaded.rows_affected(),
            "Membership and related commitments removed"
        );

        Ok(true)
    }

    #[instrument(skip(self, chain_ids), fields(chains = chain_ids.len()))]
    async fn count_by_chains(&self, chain_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, i64)>> {
        if chain_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ChainMemberCountModel>(
            r"
            SELECT chain_id, COUNT(*) AS member_count
            FROM chain_members
            WHERE chain_id = ANY($1)
            GROUP BY chain_id
            ",
        )
        .bind(raw_ids(chain_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (Snowflake::new(row.chain_id), row.member_count))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgChainMemberRepository>();
    }
}
