//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use prayer_common::{AppConfig, AppError, JwtService};
use prayer_core::SnowflakeGenerator;
use prayer_db::{
    create_pool, run_migrations, PgChainMemberRepository, PgCommitmentRepository, PgPool,
    PgPrayerChainRepository, PgPrayerLogRepository, PgPrayerRequestRepository, PgUserRepository,
};
use prayer_service::{ServiceContext, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware.
///
/// Health routes get the same tracing and timeout layers but are exempt from
/// rate limiting.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let health = apply_middleware(health_routes());

    Ok(api.merge(health).with_state(state))
}

/// Service context backed by the PostgreSQL repositories
pub fn create_service_context(pool: &PgPool, worker_id: u16) -> Result<ServiceContext, AppError> {
    let snowflake_generator =
        SnowflakeGenerator::new(worker_id).map_err(|e| AppError::Config(e.to_string()))?;

    ServiceContextBuilder::new()
        .prayer_request_repo(Arc::new(PgPrayerRequestRepository::new(pool.clone())))
        .prayer_log_repo(Arc::new(PgPrayerLogRepository::new(pool.clone())))
        .prayer_chain_repo(Arc::new(PgPrayerChainRepository::new(pool.clone())))
        .chain_member_repo(Arc::new(PgChainMemberRepository::new(pool.clone())))
        .commitment_repo(Arc::new(PgCommitmentRepository::new(pool.clone())))
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .snowflake_generator(Arc::new(snowflake_generator))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!("Database migrations applied");
    }

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let service_context = create_service_context(&pool, config.snowflake.worker_id)?;

    Ok(AppState::new(service_context, jwt_service, pool, config))
}

/// Run the HTTP server until ctrl-c
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
