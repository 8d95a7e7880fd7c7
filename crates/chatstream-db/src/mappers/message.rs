//! Chat message model -> entity mapper

use chatstream_core::entities::ChatMessage;
use chatstream_core::value_objects::{MessageId, MessageType};

use crate::models::ChatMessageModel;

impl From<ChatMessageModel> for ChatMessage {
    fn from(model: ChatMessageModel) -> Self {
        ChatMessage {
            id: model.id,
            // only ids that passed validation are ever written
            message_id: MessageId::from_trusted(model.message_id),
            sender_id: model.sender_id,
            sender_name: model.sender_name,
            content: model.content,
            message_type: MessageType::from(model.message_type),
            alt_text: model.alt_text,
            timestamp: model.timestamp,
            likes: model.likes,
            is_editable: model.is_editable,
            show_buttons: model.show_buttons,
            custom_buttons: model.custom_buttons,
            is_deleted: model.is_deleted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
