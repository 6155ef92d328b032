//! PostgreSQL implementation of PrayerChainRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use prayer_core::entities::{ChainMember, PrayerChain};
use prayer_core::error::DomainError;
use prayer_core::traits::{PrayerChainRepository, RepoResult};
use prayer_core::value_objects::Snowflake;

use crate::models::PrayerChainModel;

use super::error::{map_db_error, map_unique_violation, prayer_chain_not_found};

/// PostgreSQL implementation of PrayerChainRepository
#[derive(Clone)]
pub struct PgPrayerChainRepository {
    pool: PgPool,
}

impl PgPrayerChainRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrayerChainRepository for PgPrayerChainRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<PrayerChain>> {
        let result = sqlx::query_as::<_, PrayerChainModel>(
            r"
            SELECT id, name, description, created_by_user_id, created_at, updated_at
            FROM prayer_chains
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(PrayerChain::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<PrayerChain>> {
        let results = sqlx::query_as::<_, PrayerChainModel>(
            r"
            SELECT id, name, description, created_by_user_id, created_at, updated_at
            FROM prayer_chains
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PrayerChain::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<PrayerChain>> {
        let results = sqlx::query_as::<_, PrayerChainModel>(
            r"
            SELECT c.id, c.name, c.description, c.created_by_user_id, c.created_at, c.updated_at
            FROM prayer_chains c
            JOIN chain_members m ON m.chain_id = c.id
            WHERE m.user_id = $1 AND c.deleted_at IS NULL
            ORDER BY c.created_at DESC, c.id DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PrayerChain::from).collect())
    }

    #[instrument(skip(self, chain, creator), fields(id = %chain.id))]
    async fn create_with_creator(
        &self,
        chain: &PrayerChain,
        creator: &ChainMember,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO prayer_chains (id, name, description, created_by_user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(chain.id.into_inner())
        .bind(&chain.name)
        .bind(&chain.description)
        .bind(chain.created_by_user_id.into_inner())
        .bind(chain.created_at)
        .bind(chain.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO chain_members (id, chain_id, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(creator.id.into_inner())
        .bind(creator.chain_id.into_inner())
        .bind(creator.user_id.into_inner())
        .bind(creator.created_at)
        .bind(creator.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, chain), fields(id = %chain.id))]
    async fn update(&self, chain: &PrayerChain) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE prayer_chains
            SET name = $2, description = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(chain.id.into_inner())
        .bind(&chain.name)
        .bind(&chain.description)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(prayer_chain_not_found(chain.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE prayer_chains SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(prayer_chain_not_found(id));
        }

        Ok(())
    }
}
