//! Test fixtures and data generators
//!
//! Provides reusable request bodies and response shapes for integration tests.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data (unique across runs sharing a database)
pub fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}{}", nanos % 1_000_000_000_000, COUNTER.fetch_add(1, Ordering::SeqCst))
}

// ============================================================================
// Messages
// ============================================================================

/// Create message request
#[derive(Debug, Default, Serialize)]
pub struct CreateMessage {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_editable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_buttons: Option<Value>,
}

impl CreateMessage {
    pub fn unique() -> Self {
        Self {
            content: format!("integration message {}", unique_suffix()),
            ..Self::default()
        }
    }

    pub fn at(timestamp: f64) -> Self {
        Self {
            timestamp: Some(timestamp),
            ..Self::unique()
        }
    }

    pub fn locked() -> Self {
        Self {
            is_editable: Some(false),
            ..Self::unique()
        }
    }
}

/// Update message request
#[derive(Debug, Serialize)]
pub struct UpdateMessage {
    pub content: String,
}

/// Message as the client sees it
#[derive(Debug, Clone, Deserialize)]
pub struct MessageBody {
    pub id: String,
    pub sender: String,
    pub content: String,
    pub timestamp: f64,
    #[serde(rename = "type")]
    pub message_type: String,
    pub alt: Option<String>,
    pub likes: i64,
    pub liked: bool,
    pub editable: bool,
    #[serde(rename = "showButtons")]
    pub show_buttons: bool,
    #[serde(rename = "customButtons")]
    pub custom_buttons: Option<Value>,
    pub created_at: String,
    pub updated_at: String,
}

/// Paginated listing
#[derive(Debug, Deserialize)]
pub struct MessagePageBody {
    pub messages: Vec<MessageBody>,
    pub total: i64,
    pub has_more: bool,
    pub page: i64,
    pub page_size: i64,
}

/// Flat listing
#[derive(Debug, Deserialize)]
pub struct RecentMessagesBody {
    pub messages: Vec<MessageBody>,
    pub total: i64,
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub struct LikeBody {
    pub message_id: String,
    pub likes: i64,
    pub liked: bool,
}

#[derive(Debug, Deserialize)]
pub struct DeleteBody {
    pub message_id: String,
    pub status: String,
}

// ============================================================================
// Registration
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("user{suffix}"),
            email: format!("user{suffix}@example.com"),
            password: "TestPass123!".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyRequest {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct RegistrationPendingBody {
    pub status: String,
    pub email: String,
    pub expires_at: String,
}

#[derive(Debug, Deserialize)]
pub struct UserBody {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_banned: bool,
    pub created_at: String,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}
