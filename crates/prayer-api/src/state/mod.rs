//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! token validation, the database pool (for readiness), and configuration.

use std::sync::Arc;

use prayer_common::{AppConfig, JwtService};
use prayer_db::PgPool;
use prayer_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    jwt_service: Arc<JwtService>,
    pool: PgPool,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        service_context: ServiceContext,
        jwt_service: Arc<JwtService>,
        pool: PgPool,
        config: AppConfig,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            jwt_service,
            pool,
            config: Arc::new(config),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// PostgreSQL pool, used directly only by health checks
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("jwt_service", &"JwtService")
            .field("config", &"AppConfig")
            .finish()
    }
}
