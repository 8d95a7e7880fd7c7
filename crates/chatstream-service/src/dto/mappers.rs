//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chatstream_core::entities::{ChatMessage, User};

use super::responses::{MessageResponse, UserResponse};

// ============================================================================
// Message Mappers
// ============================================================================

impl From<&ChatMessage> for MessageResponse {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.message_id.as_str().to_string(),
            sender: message.sender_name.clone(),
            content: message.content.clone(),
            timestamp: message.timestamp,
            message_type: message.message_type.as_str().to_string(),
            alt: message.alt_text.clone(),
            likes: message.likes,
            liked: false,
            editable: message.is_editable,
            show_buttons: message.show_buttons,
            custom_buttons: message.custom_buttons.clone(),
            created_at: message.created_at,
            updated_at: message.updated_at,
        }
    }
}

impl From<ChatMessage> for MessageResponse {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.message_id.into_inner(),
            sender: message.sender_name,
            content: message.content,
            timestamp: message.timestamp,
            message_type: message.message_type.as_str().to_string(),
            alt: message.alt_text,
            likes: message.likes,
            liked: false,
            editable: message.is_editable,
            show_buttons: message.show_buttons,
            custom_buttons: message.custom_buttons,
            created_at: message.created_at,
            updated_at: message.updated_at,
        }
    }
}

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            is_banned: user.is_banned,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}
