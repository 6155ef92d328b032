//! Prayer request handlers
//!
//! Endpoints for prayer requests, "I prayed" logs, and answered prayers.

use axum::{
    extract::{Path, State},
    Json,
};
use prayer_service::dto::{
    CreatePrayerRequestRequest, MarkAnsweredRequest, PrayerLogResponse, PrayerRequestResponse,
    UpdatePrayerRequestRequest,
};
use prayer_service::PrayerService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a prayer request
///
/// POST /prayer
pub async fn create_prayer_request(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePrayerRequestRequest>,
) -> ApiResult<Created<PrayerRequestResponse>> {
    let service = PrayerService::new(state.service_context());
    let response = service.create_prayer_request(auth.user_id, request).await?;
    Ok(Created(response))
}

/// List all prayer requests
///
/// GET /prayer
pub async fn list_prayer_requests(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<PrayerRequestResponse>>> {
    let service = PrayerService::new(state.service_context());
    Ok(Json(service.list_prayer_requests().await?))
}

/// List the caller's prayer requests
///
/// GET /prayer/my-requests
pub async fn list_my_prayer_requests(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PrayerRequestResponse>>> {
    let service = PrayerService::new(state.service_context());
    Ok(Json(service.list_user_prayer_requests(auth.user_id).await?))
}

/// Get a prayer request
///
/// GET /prayer/{id}
pub async fn get_prayer_request(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<PrayerRequestResponse>> {
    let service = PrayerService::new(state.service_context());
    Ok(Json(service.get_prayer_request(path.id()?).await?))
}

/// Update an owned prayer request
///
/// PUT /prayer/{id}
pub async fn update_prayer_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
    ValidatedJson(request): ValidatedJson<UpdatePrayerRequestRequest>,
) -> ApiResult<Json<PrayerRequestResponse>> {
    let service = PrayerService::new(state.service_context());
    let response = service
        .update_prayer_request(path.id()?, auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// Delete an owned prayer request
///
/// DELETE /prayer/{id}
pub async fn delete_prayer_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
) -> ApiResult<NoContent> {
    let service = PrayerService::new(state.service_context());
    service
        .delete_prayer_request(path.id()?, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// Record that the caller prayed
///
/// POST /prayer/{id}/pray
pub async fn pray_for_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<PrayerRequestResponse>> {
    let service = PrayerService::new(state.service_context());
    Ok(Json(
        service.pray_for_request(path.id()?, auth.user_id).await?,
    ))
}

/// Who prayed for a request
///
/// GET /prayer/{id}/prayers
pub async fn get_prayers_for_request(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<Vec<PrayerLogResponse>>> {
    let service = PrayerService::new(state.service_context());
    Ok(Json(service.get_prayers_for_request(path.id()?).await?))
}

/// Mark an owned request as answered
///
/// POST /prayer/{id}/answer
pub async fn mark_as_answered(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
    ValidatedJson(request): ValidatedJson<MarkAnsweredRequest>,
) -> ApiResult<Json<PrayerRequestResponse>> {
    let service = PrayerService::new(state.service_context());
    let response = service
        .mark_as_answered(path.id()?, auth.user_id, request.testimony)
        .await?;
    Ok(Json(response))
}

/// The caller's prayer history
///
/// GET /prayer/my-prayers
pub async fn get_my_prayers(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PrayerLogResponse>>> {
    let service = PrayerService::new(state.service_context());
    Ok(Json(service.get_my_prayers(auth.user_id).await?))
}

/// Answered prayers
///
/// GET /prayer/answered
pub async fn get_answered_prayers(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<PrayerRequestResponse>>> {
    let service = PrayerService::new(state.service_context());
    Ok(Json(service.get_answered_prayers().await?))
}
