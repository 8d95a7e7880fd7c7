//! Response DTOs for API endpoints
//!
//! Field names follow what the web client reads (`showButtons`, `customButtons`, `type`).

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// Message Responses
// ============================================================================

/// Message record as served to clients
///
/// `id` carries the client-durable `message_id`; the surrogate row id is never exposed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub sender: String,
    pub content: String,
    pub timestamp: f64,
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    pub likes: i64,
    /// Likes are anonymous, so a read never reports a prior like
    pub liked: bool,
    pub editable: bool,
    #[serde(rename = "showButtons")]
    pub show_buttons: bool,
    #[serde(rename = "customButtons", skip_serializing_if = "Option::is_none")]
    pub custom_buttons: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of the paginated list
#[derive(Debug, Clone, Serialize)]
pub struct MessagePageResponse {
    pub messages: Vec<MessageResponse>,
    pub total: i64,
    pub has_more: bool,
    pub page: i64,
    pub page_size: i64,
}

/// Flat newest-first list
#[derive(Debug, Clone, Serialize)]
pub struct RecentMessagesResponse {
    pub messages: Vec<MessageResponse>,
    pub total: i64,
    pub has_more: bool,
}

/// Result of a like
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LikeResponse {
    pub message_id: String,
    pub likes: i64,
    pub liked: bool,
}

/// Result of a delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteMessageResponse {
    pub message_id: String,
    pub status: &'static str,
}

impl DeleteMessageResponse {
    pub fn deleted(message_id: String) -> Self {
        Self {
            message_id,
            status: "deleted",
        }
    }
}

// ============================================================================
// Registration Responses
// ============================================================================

/// Registration accepted; waiting for the mailed token
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationPendingResponse {
    pub status: &'static str,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// Committed user (credential hash omitted)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status per dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
