//! Chat message entity - a post in the shared stream

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::value_objects::{MessageId, MessageType};

/// Chat message as stored
///
/// `timestamp` is the display sort key supplied by the client (or the server on
/// create). `created_at`/`updated_at` are maintained by the store and only used
/// for auditing.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Store-assigned surrogate id; never exposed to clients
    pub id: i64,
    pub message_id: MessageId,
    pub sender_id: Option<i64>,
    pub sender_name: String,
    pub content: String,
    pub message_type: MessageType,
    pub alt_text: Option<String>,
    pub timestamp: f64,
    pub likes: i64,
    pub is_editable: bool,
    pub show_buttons: bool,
    /// Opaque client payload, not interpreted by the store
    pub custom_buttons: Option<Value>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Visible to readers (not soft-deleted)
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }

    /// Check if message content has been edited or liked since creation
    #[inline]
    pub fn is_modified(&self) -> bool {
        self.updated_at > self.created_at
    }

    /// Get a truncated preview of the message (for logs)
    pub fn preview(&self, max_len: usize) -> &str {
        if self.content.len() <= max_len {
            &self.content
        } else {
            let mut end = max_len;
            while !self.content.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &self.content[..end]
        }
    }
}

/// Values for inserting a new chat message
///
/// The store assigns `id`, `likes = 0`, `is_deleted = false` and both audit
/// timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChatMessage {
    pub message_id: MessageId,
    pub sender_id: Option<i64>,
    pub sender_name: String,
    pub content: String,
    pub message_type: MessageType,
    pub alt_text: Option<String>,
    pub timestamp: f64,
    pub is_editable: bool,
    pub show_buttons: bool,
    pub custom_buttons: Option<Value>,
}

impl NewChatMessage {
    /// Create a new message with default flags (editable, buttons shown)
    pub fn new(
        message_id: MessageId,
        sender_name: String,
        content: String,
        message_type: MessageType,
        timestamp: f64,
    ) -> Self {
        Self {
            message_id,
            sender_id: None,
            sender_name,
            content,
            message_type,
            alt_text: None,
            timestamp,
            is_editable: true,
            show_buttons: true,
            custom_buttons: None,
        }
    }

    pub fn with_alt_text(mut self, alt_text: Option<String>) -> Self {
        self.alt_text = alt_text;
        self
    }

    pub fn with_sender_id(mut self, sender_id: Option<i64>) -> Self {
        self.sender_id = sender_id;
        self
    }

    pub fn with_editable(mut self, is_editable: bool) -> Self {
        self.is_editable = is_editable;
        self
    }

    pub fn with_show_buttons(mut self, show_buttons: bool) -> Self {
        self.show_buttons = show_buttons;
        self
    }

    pub fn with_custom_buttons(mut self, custom_buttons: Option<Value>) -> Self {
        self.custom_buttons = custom_buttons;
        self
    }

    /// Materialize the stored row for a given surrogate id and store time
    pub fn into_message(self, id: i64, now: DateTime<Utc>) -> ChatMessage {
        ChatMessage {
            id,
            message_id: self.message_id,
            sender_id: self.sender_id,
            sender_name: self.sender_name,
            content: self.content,
            message_type: self.message_type,
            alt_text: self.alt_text,
            timestamp: self.timestamp,
            likes: 0,
            is_editable: self.is_editable,
            show_buttons: self.show_buttons,
            custom_buttons: self.custom_buttons,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}
