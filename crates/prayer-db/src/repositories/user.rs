//! PostgreSQL implementation of UserRepository (read-only)

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use prayer_core::entities::UserSummary;
use prayer_core::traits::{RepoResult, UserRepository};
use prayer_core::value_objects::Snowflake;

use crate::mappers::raw_ids;
use crate::models::UserSummaryModel;

use super::error::map_db_error;

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<UserSummary>> {
        let result = sqlx::query_as::<_, UserSummaryModel>(
            r"
            SELECT id, username, email
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(UserSummary::from))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<UserSummary>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, UserSummaryModel>(
            r"
            SELECT id, username, email
            FROM users
            WHERE id = ANY($1) AND deleted_at IS NULL
            ",
        )
        .bind(raw_ids(ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(UserSummary::from).collect())
    }
}
