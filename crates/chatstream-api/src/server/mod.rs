//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use chatstream_common::{AppConfig, AppError};
use chatstream_db::{create_pool, run_migrations, PgChatMessageRepository, PgUserRepository};
use chatstream_service::{spawn_registration_sweeper, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = apply_middleware(
        create_router(),
        &state.config().cors,
        state.config().app.env.is_production(),
    );
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = chatstream_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
        info!(dir = %config.database.migrations_dir, "Migrations applied");
    }

    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let messages = Arc::new(PgChatMessageRepository::new(pool.clone()));

    let service_context = ServiceContextBuilder::new()
        .message_repo(messages)
        .user_repo(users)
        .registration(config.registration.clone())
        .store_timeout(config.store.timeout())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, Some(pool), config))
}

/// Run the HTTP server until ctrl-c
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
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
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let sweep_every = config.registration.sweep_interval();

    let state = create_app_state(config).await?;

    let sweeper = spawn_registration_sweeper(state.shared_context(), sweep_every);

    let app = create_app(state);
    let result = run_server(app, &addr).await;

    sweeper.abort();
    result
}
