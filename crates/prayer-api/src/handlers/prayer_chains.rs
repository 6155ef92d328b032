//! Prayer chain handlers
//!
//! Endpoints for chains, membership, and prayer commitments.

use axum::{
    extract::{Path, State},
    Json,
};
use prayer_service::dto::{
    CommitToPrayRequest, CreatePrayerChainRequest, MessageResponse, PrayerChainDetailResponse,
    PrayerChainResponse, PrayerCommitmentResponse, UpdatePrayerChainRequest,
};
use prayer_service::PrayerChainService;

use crate::extractors::{AuthUser, CommitmentPath, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a prayer chain; the caller joins it
///
/// POST /prayer-chains
pub async fn create_prayer_chain(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePrayerChainRequest>,
) -> ApiResult<Created<PrayerChainResponse>> {
    let service = PrayerChainService::new(state.service_context());
    let response = service.create_prayer_chain(auth.user_id, request).await?;
    Ok(Created(response))
}

/// List all prayer chains
///
/// GET /prayer-chains
pub async fn list_prayer_chains(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<PrayerChainResponse>>> {
    let service = PrayerChainService::new(state.service_context());
    Ok(Json(service.list_prayer_chains().await?))
}

/// Chains the caller belongs to
///
/// GET /prayer-chains/my-chains
pub async fn list_my_prayer_chains(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PrayerChainResponse>>> {
    let service = PrayerChainService::new(state.service_context());
    Ok(Json(service.list_user_prayer_chains(auth.user_id).await?))
}

/// Chain with members, commitments, and identities
///
/// GET /prayer-chains/{id}
pub async fn get_prayer_chain(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<PrayerChainDetailResponse>> {
    let service = PrayerChainService::new(state.service_context());
    Ok(Json(service.get_chain_with_details(path.id()?).await?))
}

/// Update a chain; creator only
///
/// PUT /prayer-chains/{id}
pub async fn update_prayer_chain(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
    ValidatedJson(request): ValidatedJson<UpdatePrayerChainRequest>,
) -> ApiResult<Json<PrayerChainResponse>> {
    let service = PrayerChainService::new(state.service_context());
    let response = service
        .update_prayer_chain(path.id()?, auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// Delete a chain; creator only
///
/// DELETE /prayer-chains/{id}
pub async fn delete_prayer_chain(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
) -> ApiResult<NoContent> {
    let service = PrayerChainService::new(state.service_context());
    service
        .delete_prayer_chain(path.id()?, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// Join a chain
///
/// POST /prayer-chains/{id}/join
pub async fn join_chain(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<MessageResponse>> {
    let service = PrayerChainService::new(state.service_context());
    service.join_chain(auth.user_id, path.id()?).await?;
    Ok(Json(MessageResponse::new("joined prayer chain")))
}

/// Leave a chain
///
/// POST /prayer-chains/{id}/leave
pub async fn leave_chain(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<MessageResponse>> {
    let service = PrayerChainService::new(state.service_context());
    service.leave_chain(auth.user_id, path.id()?).await?;
    Ok(Json(MessageResponse::new("left prayer chain")))
}

/// Commit to pray for another member
///
/// POST /prayer-chains/commit
pub async fn commit_to_pray(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CommitToPrayRequest>,
) -> ApiResult<Created<PrayerCommitmentResponse>> {
    let service = PrayerChainService::new(state.service_context());
    let response = service.commit_to_pray(auth.user_id, request).await?;
    Ok(Created(response))
}

/// Withdraw a commitment
///
/// DELETE /prayer-chains/{id}/commit/{user_id}
pub async fn remove_commitment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommitmentPath>,
) -> ApiResult<NoContent> {
    let service = PrayerChainService::new(state.service_context());
    service
        .remove_commitment(auth.user_id, path.chain_id()?, path.user_id()?)
        .await?;
    Ok(NoContent)
}
