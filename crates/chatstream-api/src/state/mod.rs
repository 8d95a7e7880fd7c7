//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, the database pool and configuration.

use std::sync::Arc;

use chatstream_common::AppConfig;
use chatstream_db::PgPool;
use chatstream_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    /// Pool pinged by the readiness probe; absent when running on the in-process store
    pool: Option<PgPool>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, pool: Option<PgPool>, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            pool,
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Shared handle to the service context for background tasks
    pub fn shared_context(&self) -> Arc<ServiceContext> {
        Arc::clone(&self.service_context)
    }

    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("pool", &self.pool.is_some())
            .field("config", &"AppConfig")
            .finish()
    }
}
