//! PostgreSQL implementation of PrayerRequestRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use prayer_core::entities::PrayerRequest;
use prayer_core::traits::{PrayerRequestRepository, RepoResult};
use prayer_core::value_objects::{PrayerStatus, Snowflake};

use crate::models::PrayerRequestModel;

use super::error::{map_db_error, prayer_request_not_found};

/// PostgreSQL implementation of PrayerRequestRepository
#[derive(Clone)]
pub struct PgPrayerRequestRepository {
    pool: PgPool,
}

impl PgPrayerRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrayerRequestRepository for PgPrayerRequestRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<PrayerRequest>> {
        let result = sqlx::query_as::<_, PrayerRequestModel>(
            r"
            SELECT id, user_id, request, is_anonymous, prayer_count, status,
                   answered_at, answer_testimony, created_at, updated_at
            FROM prayer_requests
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(PrayerRequest::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<PrayerRequest>> {
        let results = sqlx::query_as::<_, PrayerRequestModel>(
            r"
            SELECT id, user_id, request, is_anonymous, prayer_count, status,
                   answered_at, answer_testimony, created_at, updated_at
            FROM prayer_requests
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PrayerRequest::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<PrayerRequest>> {
        let results = sqlx::query_as::<_, PrayerRequestModel>(
            r"
            SELECT id, user_id, request, is_anonymous, prayer_count, status,
                   answered_at, answer_testimony, created_at, updated_at
            FROM prayer_requests
            WHERE user_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PrayerRequest::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_answered(&self) -> RepoResult<Vec<PrayerRequest>> {
        let results = sqlx::query_as::<_, PrayerRequestModel>(
            r"
            SELECT id, user_id, request, is_anonymous, prayer_count, status,
                   answered_at, answer_testimony, created_at, updated_at
            FROM prayer_requests
            WHERE status = $1 AND deleted_at IS NULL
            ORDER BY answered_at DESC, id DESC
            ",
        )
        .bind(PrayerStatus::Answered.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PrayerRequest::from).collect())
    }

    #[instrument(skip(self, request), fields(id = %request.id))]
    async fn create(&self, request: &PrayerRequest) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO prayer_requests
                (id, user_id, request, is_anonymous, prayer_count, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(request.id.into_inner())
        .bind(request.user_id.into_inner())
        .bind(&request.request)
        .bind(request.is_anonymous)
        .bind(request.prayer_count)
        .bind(request.status.as_str())
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, request), fields(id = %request.id))]
    async fn update(&self, request: &PrayerRequest) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE prayer_requests
            SET request = $2, is_anonymous = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(request.id.into_inner())
        .bind(&request.request)
        .bind(request.is_anonymous)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(prayer_request_not_found(request.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE prayer_requests
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(prayer_request_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self, testimony))]
    async fn mark_answered(
        &self,
        id: Snowflake,
        testimony: &str,
        answered_at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        // The status guard makes concurrent answers race on the row lock;
        // only one UPDATE can see 'pending'.
        let result = sqlx::query(
            r"
            UPDATE prayer_requests
            SET status = $2, answered_at = $3, answer_testimony = $4, updated_at = $3
            WHERE id = $1 AND status = $5 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(PrayerStatus::Answered.as_str())
        .bind(answered_at)
        .bind(testimony)
        .bind(PrayerStatus::Pending.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }
}
