//! Route definitions
//!
//! API routes are mounted under /api; health probes sit at the root.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, messages, users};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/api", api_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new().merge(message_routes()).merge(user_routes())
}

/// Message routes
fn message_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/messages",
            get(messages::list_messages).post(messages::create_message),
        )
        .route(
            "/messages/recent",
            get(messages::recent_messages_query).post(messages::recent_messages),
        )
        .route(
            "/messages/:message_id",
            get(messages::get_message)
                .put(messages::update_message)
                .delete(messages::delete_message),
        )
        .route("/messages/:message_id/like", post(messages::like_message))
}

/// Registration routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(users::register))
        .route("/users/verify", post(users::verify))
}
