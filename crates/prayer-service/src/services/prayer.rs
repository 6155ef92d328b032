//! Prayer tracking service
//!
//! Handles prayer requests, "I prayed" logs, and the answered transition.

use chrono::Utc;
use prayer_core::entities::{PrayerLog, PrayerRequest};
use prayer_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    CreatePrayerRequestRequest, PrayerLogResponse, PrayerRequestResponse,
    UpdatePrayerRequestRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Prayer tracking service
pub struct PrayerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PrayerService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new prayer request owned by `user_id`
    #[instrument(skip(self, request))]
    pub async fn create_prayer_request(
        &self,
        user_id: Snowflake,
        request: CreatePrayerRequestRequest,
    ) -> ServiceResult<PrayerRequestResponse> {
        let prayer_request = PrayerRequest::new(
            self.ctx.generate_id(),
            user_id,
            request.request,
            request.is_anonymous,
        );

        self.ctx
            .prayer_request_repo()
            .create(&prayer_request)
            .await?;

        info!(
            prayer_request_id = %prayer_request.id,
            user_id = %user_id,
            "Prayer request created"
        );

        Ok(PrayerRequestResponse::from(&prayer_request))
    }

    /// Get a live prayer request by ID
    #[instrument(skip(self))]
    pub async fn get_prayer_request(&self, id: Snowflake) -> ServiceResult<PrayerRequestResponse> {
        let request = self.find_request(id).await?;
        Ok(PrayerRequestResponse::from(&request))
    }

    /// All live prayer requests, newest first
    #[instrument(skip(self))]
    pub async fn list_prayer_requests(&self) -> ServiceResult<Vec<PrayerRequestResponse>> {
        let requests = self.ctx.prayer_request_repo().find_all().await?;
        Ok(requests.iter().map(PrayerRequestResponse::from).collect())
    }

    /// The caller's own prayer requests, newest first
    #[instrument(skip(self))]
    pub async fn list_user_prayer_requests(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<PrayerRequestResponse>> {
        let requests = self.ctx.prayer_request_repo().find_by_user(user_id).await?;
        Ok(requests.iter().map(PrayerRequestResponse::from).collect())
    }

    /// Replace the text and anonymity flag of an owned request
    #[instrument(skip(self, request))]
    pub async fn update_prayer_request(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        request: UpdatePrayerRequestRequest,
    ) -> ServiceResult<PrayerRequestResponse> {
        let mut prayer_request = self.find_owned_request(id, user_id).await?;

        let is_anonymous = request.is_anonymous.unwrap_or(prayer_request.is_anonymous);
        prayer_request.update_content(request.request, is_anonymous);

        self.ctx
            .prayer_request_repo()
            .update(&prayer_request)
            .await?;

        info!(prayer_request_id = %id, "Prayer request updated");

        Ok(PrayerRequestResponse::from(&prayer_request))
    }

    /// Soft delete an owned request
    #[instrument(skip(self))]
    pub async fn delete_prayer_request(
        &self,
        id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        self.find_owned_request(id, user_id).await?;

        self.ctx.prayer_request_repo().delete(id).await?;

        info!(prayer_request_id = %id, user_id = %user_id, "Prayer request deleted");

        Ok(())
    }

    /// Record that `user_id` prayed for a request.
    ///
    /// Each user counts once per request; the log insert and the counter
    /// increment are persisted together. Returns the refreshed request.
    #[instrument(skip(self))]
    pub async fn pray_for_request(
        &self,
        id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<PrayerRequestResponse> {
        self.find_request(id).await?;

        if self.ctx.prayer_log_repo().exists(id, user_id).await? {
            return Err(DomainError::AlreadyPrayed.into());
        }

        let log = PrayerLog::new(self.ctx.generate_id(), id, user_id);
        self.ctx.prayer_log_repo().record(&log).await?;

        let request = self.find_request(id).await?;

        info!(
            prayer_request_id = %id,
            user_id = %user_id,
            prayer_count = request.prayer_count,
            "Prayer recorded"
        );

        Ok(PrayerRequestResponse::from(&request))
    }

    /// Who prayed for a request, newest first
    #[instrument(skip(self))]
    pub async fn get_prayers_for_request(
        &self,
        id: Snowflake,
    ) -> ServiceResult<Vec<PrayerLogResponse>> {
        self.find_request(id).await?;

        let logs = self.ctx.prayer_log_repo().find_by_request(id).await?;
        Ok(logs.iter().map(PrayerLogResponse::from).collect())
    }

    /// Move an owned, pending request to answered with a testimony.
    ///
    /// Ownership is checked before state, so a non-owner is always refused
    /// with `NotRequestOwner`.
    #[instrument(skip(self, testimony))]
    pub async fn mark_as_answered(
        &self,
        id: Snowflake,
        user_id: Snowflake,
        testimony: String,
    ) -> ServiceResult<PrayerRequestResponse> {
        let mut request = self.find_owned_request(id, user_id).await?;

        let answered_at = Utc::now();
        request.mark_answered(testimony, answered_at)?;

        let testimony = request.answer_testimony.as_deref().unwrap_or_default();
        let transitioned = self
            .ctx
            .prayer_request_repo()
            .mark_answered(id, testimony, answered_at)
            .await?;

        // Someone else answered between our read and the conditional write
        if !transitioned {
            return Err(DomainError::AlreadyAnswered(id).into());
        }

        info!(prayer_request_id = %id, "Prayer request marked as answered");

        Ok(PrayerRequestResponse::from(&request))
    }

    /// The caller's prayer history, newest first
    #[instrument(skip(self))]
    pub async fn get_my_prayers(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<PrayerLogResponse>> {
        let logs = self.ctx.prayer_log_repo().find_by_user(user_id).await?;

        Ok(logs
            .iter()
            .map(|(log, request)| PrayerLogResponse::new(log, request.as_ref()))
            .collect())
    }

    /// Answered requests, most recently answered first
    #[instrument(skip(self))]
    pub async fn get_answered_prayers(&self) -> ServiceResult<Vec<PrayerRequestResponse>> {
        let requests = self.ctx.prayer_request_repo().find_answered().await?;
        Ok(requests.iter().map(PrayerRequestResponse::from).collect())
    }

    // === Helpers ===

    async fn find_request(&self, id: Snowflake) -> ServiceResult<PrayerRequest> {
        Ok(self
            .ctx
            .prayer_request_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PrayerRequestNotFound(id))?)
    }

    async fn find_owned_request(
        &self,
        id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<PrayerRequest> {
        let request = self.find_request(id).await?;
        if !request.is_owner(user_id) {
            return Err(DomainError::NotRequestOwner.into());
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceError;
    use crate::testing::test_context;
    use prayer_core::{DomainError, PrayerStatus};

    fn create(text: &str) -> CreatePrayerRequestRequest {
        CreatePrayerRequestRequest {
            request: text.to_string(),
            is_anonymous: true,
        }
    }

    fn domain(err: ServiceError) -> DomainError {
        match err {
            ServiceError::Domain(e) => e,
            other => panic!("expected domain error, got {other:?}"),
        }
    }

    fn id(s: &str) -> Snowflake {
        Snowflake::parse(s).unwrap()
    }

    const ALICE: Snowflake = Snowflake::new(1);
    const BOB: Snowflake = Snowflake::new(2);
    const CAROL: Snowflake = Snowflake::new(3);

    #[tokio::test]
    async fn test_create_starts_pending_with_zero_count() {
        let (_, ctx) = test_context();
        let service = PrayerService::new(&ctx);

        let created = service
            .create_prayer_request(ALICE, create("pray for healing"))
            .await
            .unwrap();

        assert_eq!(created.status, PrayerStatus::Pending);
        assert_eq!(created.prayer_count, 0);
        assert!(created.answered_at.is_none());

        let fetched = service.get_prayer_request(id(&created.id)).await.unwrap();
        assert_eq!(fetched.request, "pray for healing");
    }

    #[tokio::test]
    async fn test_get_unknown_request_is_not_found() {
        let (_, ctx) = test_context();
        let err = PrayerService::new(&ctx)
            .get_prayer_request(Snowflake::new(404))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert!(matches!(domain(err), DomainError::PrayerRequestNotFound(_)));
    }

    #[tokio::test]
    async fn test_lists_are_newest_first_and_scoped_to_user() {
        let (_, ctx) = test_context();
        let service = PrayerService::new(&ctx);

        let first = service
            .create_prayer_request(ALICE, create("first"))
            .await
            .unwrap();
        let second = service
            .create_prayer_request(BOB, create("second"))
            .await
            .unwrap();
        let third = service
            .create_prayer_request(ALICE, create("third"))
            .await
            .unwrap();

        let all = service.list_prayer_requests().await.unwrap();
        let ids: Vec<_> = all.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![third.id.clone(), second.id, first.id.clone()]);

        let mine = service.list_user_prayer_requests(ALICE).await.unwrap();
        let ids: Vec<_> = mine.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![third.id, first.id]);
    }

    #[tokio::test]
    async fn test_update_and_delete_are_owner_only() {
        let (store, ctx) = test_context();
        let service = PrayerService::new(&ctx);
        let created = service
            .create_prayer_request(ALICE, create("original"))
            .await
            .unwrap();
        let req_id = id(&created.id);

        let update = UpdatePrayerRequestRequest {
            request: "hijacked".to_string(),
            is_anonymous: Some(false),
        };
        let err = service
            .update_prayer_request(req_id, BOB, update)
            .await
            .unwrap_err();
        assert!(matches!(domain(err), DomainError::NotRequestOwner));

        let update = UpdatePrayerRequestRequest {
            request: "revised".to_string(),
            is_anonymous: None,
        };
        let updated = service
            .update_prayer_request(req_id, ALICE, update)
            .await
            .unwrap();
        assert_eq!(updated.request, "revised");
        assert!(updated.is_anonymous);

        let err = service
            .delete_prayer_request(req_id, BOB)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);

        service.delete_prayer_request(req_id, ALICE).await.unwrap();
        assert!(service.get_prayer_request(req_id).await.is_err());
        // Soft delete keeps the row
        assert!(store.request_row(req_id).is_some());
    }

    #[tokio::test]
    async fn test_pray_twice_counts_once() {
        let (store, ctx) = test_context();
        let service = PrayerService::new(&ctx);
        let created = service
            .create_prayer_request(ALICE, create("healing"))
            .await
            .unwrap();
        let req_id = id(&created.id);

        let after = service.pray_for_request(req_id, BOB).await.unwrap();
        assert_eq!(after.prayer_count, 1);

        let err = service.pray_for_request(req_id, BOB).await.unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert!(matches!(domain(err), DomainError::AlreadyPrayed));

        let current = service.get_prayer_request(req_id).await.unwrap();
        assert_eq!(current.prayer_count, 1);
        assert_eq!(store.log_count(req_id), 1);

        let after = service.pray_for_request(req_id, CAROL).await.unwrap();
        assert_eq!(after.prayer_count, 2);
    }

    #[tokio::test]
    async fn test_pray_for_missing_request_is_not_found() {
        let (_, ctx) = test_context();
        let err = PrayerService::new(&ctx)
            .pray_for_request(Snowflake::new(77), BOB)
            .await
            .unwrap_err();
        assert!(matches!(domain(err), DomainError::PrayerRequestNotFound(_)));
    }

    #[tokio::test]
    async fn test_non_owner_cannot_answer_in_any_state() {
        let (_, ctx) = test_context();
        let service = PrayerService::new(&ctx);
        let created = service
            .create_prayer_request(ALICE, create("job"))
            .await
            .unwrap();
        let req_id = id(&created.id);

        let err = service
            .mark_as_answered(req_id, BOB, "mine now".to_string())
            .await
            .unwrap_err();
        assert!(matches!(domain(err), DomainError::NotRequestOwner));

        service
            .mark_as_answered(req_id, ALICE, "got the job".to_string())
            .await
            .unwrap();

        // Still forbidden once answered, not a conflict
        let err = service
            .mark_as_answered(req_id, BOB, "mine now".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_double_answer_keeps_first_testimony() {
        let (_, ctx) = test_context();
        let service = PrayerService::new(&ctx);
        let created = service
            .create_prayer_request(ALICE, create("job"))
            .await
            .unwrap();
        let req_id = id(&created.id);

        let answered = service
            .mark_as_answered(req_id, ALICE, "first".to_string())
            .await
            .unwrap();
        assert_eq!(answered.status, PrayerStatus::Answered);
        assert!(answered.answered_at.is_some());

        let err = service
            .mark_as_answered(req_id, ALICE, "second".to_string())
            .await
            .unwrap_err();
        assert!(matches!(domain(err), DomainError::AlreadyAnswered(_)));

        let current = service.get_prayer_request(req_id).await.unwrap();
        assert_eq!(current.answer_testimony.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_prayers_for_request_and_history() {
        let (_, ctx) = test_context();
        let service = PrayerService::new(&ctx);
        let one = service
            .create_prayer_request(ALICE, create("one"))
            .await
            .unwrap();
        let two = service
            .create_prayer_request(ALICE, create("two"))
            .await
            .unwrap();

        service.pray_for_request(id(&one.id), BOB).await.unwrap();
        service.pray_for_request(id(&two.id), BOB).await.unwrap();
        service.pray_for_request(id(&one.id), CAROL).await.unwrap();

        let who = service.get_prayers_for_request(id(&one.id)).await.unwrap();
        assert_eq!(who.len(), 2);
        assert_eq!(who[0].user_id, CAROL.to_string());

        service
            .delete_prayer_request(id(&two.id), ALICE)
            .await
            .unwrap();

        let history = service.get_my_prayers(BOB).await.unwrap();
        assert_eq!(history.len(), 2);
        // Newest first; the deleted request is no longer embedded
        assert_eq!(history[0].prayer_request_id, two.id);
        assert!(history[0].prayer_request.is_none());
        assert_eq!(
            history[1].prayer_request.as_ref().map(|r| r.id.as_str()),
            Some(one.id.as_str())
        );
    }

    #[tokio::test]
    async fn test_pray_then_answer_appears_in_answered_list() {
        let (_, ctx) = test_context();
        let service = PrayerService::new(&ctx);

        let created = service
            .create_prayer_request(ALICE, create("pray for healing"))
            .await
            .unwrap();
        let req_id = id(&created.id);
        assert_eq!(created.prayer_count, 0);

        let prayed = service.pray_for_request(req_id, BOB).await.unwrap();
        assert_eq!(prayed.prayer_count, 1);

        let err = service.pray_for_request(req_id, BOB).await.unwrap_err();
        assert_eq!(err.status_code(), 409);

        let answered = service
            .mark_as_answered(req_id, ALICE, "healed!".to_string())
            .await
            .unwrap();
        assert_eq!(answered.status, PrayerStatus::Answered);
        assert_eq!(answered.prayer_count, 1);

        let answered_list = service.get_answered_prayers().await.unwrap();
        assert_eq!(answered_list.len(), 1);
        assert_eq!(answered_list[0].id, created.id);
        assert_eq!(
            answered_list[0].answer_testimony.as_deref(),
            Some("healed!")
        );
    }

    #[tokio::test]
    async fn test_answered_list_follows_answer_time_not_creation() {
        let (_, ctx) = test_context();
        let service = PrayerService::new(&ctx);

        let first = service
            .create_prayer_request(ALICE, create("first asked"))
            .await
            .unwrap();
        let second = service
            .create_prayer_request(ALICE, create("second asked"))
            .await
            .unwrap();
        // Still pending, so never listed
        service
            .create_prayer_request(ALICE, create("still waiting"))
            .await
            .unwrap();

        service
            .mark_as_answered(id(&second.id), ALICE, "answered early".to_string())
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        service
            .mark_as_answered(id(&first.id), ALICE, "answered later".to_string())
            .await
            .unwrap();

        let answered = service.get_answered_prayers().await.unwrap();
        let order: Vec<&str> = answered.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(order, vec![first.id.as_str(), second.id.as_str()]);
    }
}
