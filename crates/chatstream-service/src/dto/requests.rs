//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use chatstream_core::value_objects::SortOrder;

/// Display name used when the client does not supply one
pub const DEFAULT_SENDER_NAME: &str = "匿名用户";

// ============================================================================
// Message Requests
// ============================================================================

/// Create message request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: String,

    #[serde(default = "default_message_type")]
    #[validate(length(min = 1, max = 32, message = "Message type must be 1-32 characters"))]
    pub message_type: String,

    #[serde(default = "default_sender_name")]
    #[validate(length(min = 1, max = 50, message = "Sender name must be 1-50 characters"))]
    pub sender_name: String,

    #[validate(length(max = 1000, message = "Alt text must be at most 1000 characters"))]
    pub alt_text: Option<String>,

    /// Display sort key in epoch seconds; server time when absent
    pub timestamp: Option<f64>,

    /// Optional reference to a registered user
    pub sender_id: Option<i64>,

    #[serde(default = "default_true")]
    pub is_editable: bool,

    #[serde(default = "default_true")]
    pub show_buttons: bool,

    /// Opaque client payload
    pub custom_buttons: Option<Value>,
}

impl CreateMessageRequest {
    /// Minimal request with defaults for everything but the content
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            message_type: default_message_type(),
            sender_name: default_sender_name(),
            alt_text: None,
            timestamp: None,
            sender_id: None,
            is_editable: true,
            show_buttons: true,
            custom_buttons: None,
        }
    }
}

/// Update message request (content only)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMessageRequest {
    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: String,
}

/// Paginated list query
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct ListMessagesRequest {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub page_size: i64,

    #[serde(default)]
    pub sort_order: SortOrder,
}

impl Default for ListMessagesRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            sort_order: SortOrder::Desc,
        }
    }
}

/// Flat newest-first list
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct RecentMessagesRequest {
    #[validate(range(min = 1, max = 1000, message = "Limit must be between 1 and 1000"))]
    pub limit: Option<i64>,
}

impl RecentMessagesRequest {
    pub const DEFAULT_LIMIT: i64 = 50;

    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

// ============================================================================
// Registration Requests
// ============================================================================

/// Start a registration; the account exists only after verification
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Complete a registration with the mailed token
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyRequest {
    #[validate(length(min = 1, max = 128, message = "Token must be 1-128 characters"))]
    pub token: String,
}

fn default_message_type() -> String {
    "text".to_string()
}

fn default_sender_name() -> String {
    DEFAULT_SENDER_NAME.to_string()
}

fn default_true() -> bool {
    true
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}
