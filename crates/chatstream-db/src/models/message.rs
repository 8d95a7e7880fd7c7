//! Chat message database model

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;

/// Database model for chat_messages table
#[derive(Debug, Clone, FromRow)]
pub struct ChatMessageModel {
    pub id: i64,
    pub message_id: String,
    pub sender_id: Option<i64>,
    pub sender_name: String,
    pub content: String,
    pub message_type: String,
    pub alt_text: Option<String>,
    pub timestamp: f64,
    pub likes: i64,
    pub is_editable: bool,
    pub show_buttons: bool,
    pub custom_buttons: Option<Value>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
