//! PostgreSQL implementation of CommitmentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use prayer_core::entities::PrayerCommitment;
use prayer_core::error::DomainError;
use prayer_core::traits::{CommitmentRepository, RepoResult};
use prayer_core::value_objects::Snowflake;

use crate::models::PrayerCommitmentModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of CommitmentRepository
#[derive(Clone)]
pub struct PgCommitmentRepository {
    pool: PgPool,
}

impl PgCommitmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommitmentRepository for PgCommitmentRepository {
    #[instrument(skip(self))]
    async fn exists(
        &self,
        chain_id: Snowflake,
        member_id: Snowflake,
        pray_for_user_id: Snowflake,
    ) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM prayer_commitments
                WHERE chain_id = $1 AND member_id = $2 AND pray_for_user_id = $3
            )
            ",
        )
        .bind(chain_id.into_inner())
        .bind(member_id.into_inner())
        .bind(pray_for_user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, commitment), fields(chain_id = %commitment.chain_id))]
    async fn create(&self, commitment: &PrayerCommitment) -> RepoResult<()> {
        // The target must still be a member when the row lands; locking its
        // membership row makes a concurrent leave wait for (or beat) us.
        let result = sqlx::query(
            r"
            INSERT INTO prayer_commitments
                (id, chain_id, member_id, pray_for_user_id, created_at, updated_at)
            SELECT $1, $2, $3, $4, $5, $6
            WHERE EXISTS (
                SELECT 1 FROM chain_members
                WHERE chain_id = $2 AND user_id = $4
                FOR KEY SHARE
            )
            ",
        )
        .bind(commitment.id.into_inner())
        .bind(commitment.chain_id.into_inner())
        .bind(commitment.member_id.into_inner())
        .bind(commitment.pray_for_user_id.into_inner())
        .bind(commitment.created_at)
        .bind(commitment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateCommitment))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TargetNotMember);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(
        &self,
        chain_id: Snowflake,
        member_id: Snowflake,
        pray_for_user_id: Snowflake,
    ) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM prayer_commitments
            WHERE chain_id = $1 AND member_id = $2 AND pray_for_user_id = $3
            ",
        )
        .bind(chain_id.into_inner())
        .bind(member_id.into_inner())
        .bind(pray_for_user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn find_by_chain(&self, chain_id: Snowflake) -> RepoResult<Vec<PrayerCommitment>> {
        let results = sqlx::query_as::<_, PrayerCommitmentModel>(
            r"
            SELECT id, chain_id, member_id, pray_for_user_id, created_at, updated_at
            FROM prayer_commitments
            WHERE chain_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(chain_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PrayerCommitment::from).collect())
    }
}
