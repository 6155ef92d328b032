//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{health, prayer, prayer_chains};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(prayer_routes())
        .merge(prayer_chain_routes())
}

/// Prayer request routes
fn prayer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/prayer",
            post(prayer::create_prayer_request).get(prayer::list_prayer_requests),
        )
        .route("/prayer/my-requests", get(prayer::list_my_prayer_requests))
        .route("/prayer/my-prayers", get(prayer::get_my_prayers))
        .route("/prayer/answered", get(prayer::get_answered_prayers))
        .route(
            "/prayer/:id",
            get(prayer::get_prayer_request)
                .put(prayer::update_prayer_request)
                .delete(prayer::delete_prayer_request),
        )
        .route("/prayer/:id/pray", post(prayer::pray_for_request))
        .route("/prayer/:id/prayers", get(prayer::get_prayers_for_request))
        .route("/prayer/:id/answer", post(prayer::mark_as_answered))
}

/// Prayer chain routes
fn prayer_chain_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/prayer-chains",
            post(prayer_chains::create_prayer_chain).get(prayer_chains::list_prayer_chains),
        )
        .route(
            "/prayer-chains/my-chains",
            get(prayer_chains::list_my_prayer_chains),
        )
        .route("/prayer-chains/commit", post(prayer_chains::commit_to_pray))
        .route(
            "/prayer-chains/:id",
            get(prayer_chains::get_prayer_chain)
                .put(prayer_chains::update_prayer_chain)
                .delete(prayer_chains::delete_prayer_chain),
        )
        .route("/prayer-chains/:id/join", post(prayer_chains::join_chain))
        .route("/prayer-chains/:id/leave", post(prayer_chains::leave_chain))
        .route(
            "/prayer-chains/:id/commit/:user_id",
            delete(prayer_chains::remove_commitment),
        )
}
