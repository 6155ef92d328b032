//! PostgreSQL implementation of PrayerLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use prayer_core::entities::{PrayerLog, PrayerRequest};
use prayer_core::error::DomainError;
use prayer_core::traits::{PrayerLogRepository, RepoResult};
use prayer_core::value_objects::Snowflake;

use crate::mappers::log_with_request;
use crate::models::{PrayerLogModel, PrayerLogWithRequestModel};

use super::error::{map_db_error, map_unique_violation, prayer_request_not_found};

/// PostgreSQL implementation of PrayerLogRepository
#[derive(Clone)]
pub struct PgPrayerLogRepository {
    pool: PgPool,
}

impl PgPrayerLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrayerLogRepository for PgPrayerLogRepository {
    #[instrument(skip(self))]
    async fn exists(&self, prayer_request_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM prayer_logs WHERE prayer_request_id = $1 AND user_id = $2
            )
            ",
        )
        .bind(prayer_request_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, log), fields(request_id = %log.prayer_request_id, user_id = %log.user_id))]
    async fn record(&self, log: &PrayerLog) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO prayer_logs (id, prayer_request_id, user_id, prayed_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(log.id.into_inner())
        .bind(log.prayer_request_id.into_inner())
        .bind(log.user_id.into_inner())
        .bind(log.prayed_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyPrayed))?;

        let result = sqlx::query(
            r"
            UPDATE prayer_requests
            SET prayer_count = prayer_count + 1
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(log.prayer_request_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls back the log insert
            return Err(prayer_request_not_found(log.prayer_request_id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_user(
        &self,
        user_id: Snowflake,
    ) -> RepoResult<Vec<(PrayerLog, Option<PrayerRequest>)>> {
        let rows = sqlx::query_as::<_, PrayerLogWithRequestModel>(
            r"
            SELECT l.id, l.prayer_request_id, l.user_id, l.prayed_at,
                   r.id AS r_id, r.user_id AS r_user_id, r.request AS r_request,
                   r.is_anonymous AS r_is_anonymous, r.prayer_count AS r_prayer_count,
                   r.status AS r_status, r.answered_at AS r_answered_at,
                   r.answer_testimony AS r_answer_testimony,
                   r.created_at AS r_created_at, r.updated_at AS r_updated_at
            FROM prayer_logs l
            LEFT JOIN prayer_requests r
                ON r.id = l.prayer_request_id AND r.deleted_at IS NULL
            WHERE l.user_id = $1
            ORDER BY l.prayed_at DESC, l.id DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(log_with_request).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_request(&self, prayer_request_id: Snowflake) -> RepoResult<Vec<PrayerLog>> {
        let rows = sqlx::query_as::<_, PrayerLogModel>(
            r"
            SELECT id, prayer_request_id, user_id, prayed_at
            FROM prayer_logs
            WHERE prayer_request_id = $1
            ORDER BY prayed_at DESC, id DESC
            ",
        )
        .bind(prayer_request_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(PrayerLog::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgPrayerLogRepository>();
    }
}
