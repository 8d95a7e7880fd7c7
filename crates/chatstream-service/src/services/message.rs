//! Message service
//!
//! Handles message creation, listing, editing, likes and soft deletion.

use chatstream_core::entities::NewChatMessage;
use chatstream_core::traits::MessageQuery;
use chatstream_core::value_objects::{MessageId, MessageType};
use chatstream_core::DomainError;
use chrono::Utc;
use tracing::{error, info, instrument, warn};
use validator::Validate;

use crate::dto::{
    CreateMessageRequest, DeleteMessageResponse, LikeResponse, ListMessagesRequest,
    MessagePageResponse, MessageResponse, RecentMessagesRequest, RecentMessagesResponse,
    UpdateMessageRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::unit_of_work::with_deadline;

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new message
    #[instrument(skip(self, request))]
    pub async fn create_message(&self, request: CreateMessageRequest) -> ServiceResult<MessageResponse> {
        let message_id = self.ctx.generate_message_id();

        self.create_inner(&message_id, request)
            .await
            .inspect_err(|e| log_failure("create_message", message_id.as_str(), e))
    }

    async fn create_inner(
        &self,
        message_id: &MessageId,
        request: CreateMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        request.validate()?;
        let timestamp = resolve_timestamp(request.timestamp)?;

        if let Some(sender_id) = request.sender_id {
            let sender = with_deadline(
                self.ctx.store_timeout(),
                "find_sender",
                self.ctx.user_repo().find_by_id(sender_id),
            )
            .await?
            .ok_or(DomainError::UserNotFound(sender_id))?;

            if !sender.can_post() {
                return Err(DomainError::UserBanned.into());
            }
        }

        let new_message = NewChatMessage::new(
            message_id.clone(),
            request.sender_name,
            request.content,
            MessageType::from(request.message_type),
            timestamp,
        )
        .with_sender_id(request.sender_id)
        .with_alt_text(request.alt_text)
        .with_editable(request.is_editable)
        .with_show_buttons(request.show_buttons)
        .with_custom_buttons(request.custom_buttons);

        let message = with_deadline(
            self.ctx.store_timeout(),
            "insert_message",
            self.ctx.message_repo().insert(&new_message),
        )
        .await?;

        info!(
            message_id = %message.message_id,
            sender = %message.sender_name,
            message_type = %message.message_type,
            "Message created"
        );

        Ok(MessageResponse::from(message))
    }

    /// List a page of active messages
    #[instrument(skip(self))]
    pub async fn list_messages(&self, request: ListMessagesRequest) -> ServiceResult<MessagePageResponse> {
        self.list_inner(request)
            .await
            .inspect_err(|e| log_failure("list_messages", "-", e))
    }

    async fn list_inner(&self, request: ListMessagesRequest) -> ServiceResult<MessagePageResponse> {
        request.validate()?;

        let offset = (request.page - 1)
            .checked_mul(request.page_size)
            .ok_or_else(|| ServiceError::validation("Page is out of range"))?;
        let query = MessageQuery {
            sort_order: request.sort_order,
            offset,
            limit: request.page_size,
        };

        let page = with_deadline(
            self.ctx.store_timeout(),
            "find_active_page",
            self.ctx.message_repo().find_active_page(query),
        )
        .await?;

        let has_more = page.has_more(offset);
        Ok(MessagePageResponse {
            messages: page.messages.into_iter().map(MessageResponse::from).collect(),
            total: page.total,
            has_more,
            page: request.page,
            page_size: request.page_size,
        })
    }

    /// List the newest messages without paging
    #[instrument(skip(self))]
    pub async fn recent_messages(
        &self,
        request: RecentMessagesRequest,
    ) -> ServiceResult<RecentMessagesResponse> {
        self.recent_inner(request)
            .await
            .inspect_err(|e| log_failure("recent_messages", "-", e))
    }

    async fn recent_inner(&self, request: RecentMessagesRequest) -> ServiceResult<RecentMessagesResponse> {
        request.validate()?;

        let page = with_deadline(
            self.ctx.store_timeout(),
            "find_active_page",
            self.ctx
                .message_repo()
                .find_active_page(MessageQuery::latest(request.effective_limit())),
        )
        .await?;

        let has_more = page.has_more(0);
        Ok(RecentMessagesResponse {
            messages: page.messages.into_iter().map(MessageResponse::from).collect(),
            total: page.total,
            has_more,
        })
    }

    /// Get one active message
    #[instrument(skip(self))]
    pub async fn get_message(&self, message_id: &str) -> ServiceResult<MessageResponse> {
        self.get_inner(message_id)
            .await
            .inspect_err(|e| log_failure("get_message", message_id, e))
    }

    async fn get_inner(&self, raw_id: &str) -> ServiceResult<MessageResponse> {
        let message_id = parse_message_id(raw_id)?;

        let message = with_deadline(
            self.ctx.store_timeout(),
            "find_message",
            self.ctx.message_repo().find_by_message_id(&message_id),
        )
        .await?
        .filter(|m| m.is_active())
        .ok_or(DomainError::MessageNotFound(message_id))?;

        Ok(MessageResponse::from(message))
    }

    /// Replace the content of an editable message
    #[instrument(skip(self, request))]
    pub async fn update_message(
        &self,
        message_id: &str,
        request: UpdateMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        self.update_inner(message_id, request)
            .await
            .inspect_err(|e| log_failure("update_message", message_id, e))
    }

    async fn update_inner(
        &self,
        raw_id: &str,
        request: UpdateMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let message_id = parse_message_id(raw_id)?;
        request.validate()?;

        let message = with_deadline(
            self.ctx.store_timeout(),
            "update_content",
            self.ctx
                .message_repo()
                .update_content(&message_id, &request.content, Utc::now()),
        )
        .await?;

        info!(message_id = %message.message_id, "Message updated");

        Ok(MessageResponse::from(message))
    }

    /// Count one more like
    #[instrument(skip(self))]
    pub async fn like_message(&self, message_id: &str) -> ServiceResult<LikeResponse> {
        self.like_inner(message_id)
            .await
            .inspect_err(|e| log_failure("like_message", message_id, e))
    }

    async fn like_inner(&self, raw_id: &str) -> ServiceResult<LikeResponse> {
        let message_id = parse_message_id(raw_id)?;

        let likes = with_deadline(
            self.ctx.store_timeout(),
            "increment_likes",
            self.ctx.message_repo().increment_likes(&message_id, 1),
        )
        .await?;

        info!(message_id = %message_id, likes, "Message liked");

        Ok(LikeResponse {
            message_id: message_id.into_inner(),
            likes,
            liked: true,
        })
    }

    /// Soft-delete a message; repeated calls succeed
    #[instrument(skip(self))]
    pub async fn delete_message(&self, message_id: &str) -> ServiceResult<DeleteMessageResponse> {
        self.delete_inner(message_id)
            .await
            .inspect_err(|e| log_failure("delete_message", message_id, e))
    }

    async fn delete_inner(&self, raw_id: &str) -> ServiceResult<DeleteMessageResponse> {
        let message_id = parse_message_id(raw_id)?;

        with_deadline(
            self.ctx.store_timeout(),
            "soft_delete",
            self.ctx.message_repo().soft_delete(&message_id),
        )
        .await?;

        info!(message_id = %message_id, "Message deleted");

        Ok(DeleteMessageResponse::deleted(message_id.into_inner()))
    }
}

fn parse_message_id(raw: &str) -> ServiceResult<MessageId> {
    MessageId::parse(raw).map_err(|e| ServiceError::validation(format!("Invalid message id: {e}")))
}

/// Client timestamp if valid, otherwise now in fractional epoch seconds
fn resolve_timestamp(timestamp: Option<f64>) -> ServiceResult<f64> {
    match timestamp {
        Some(ts) if ts.is_finite() && ts >= 0.0 => Ok(ts),
        Some(_) => Err(ServiceError::validation(
            "Timestamp must be a finite, non-negative number",
        )),
        None => Ok(Utc::now().timestamp_micros() as f64 / 1_000_000.0),
    }
}

fn log_failure(operation: &'static str, message_id: &str, err: &ServiceError) {
    if err.status_code() >= 500 {
        error!(operation, message_id, kind = err.error_code(), error = %err, "Message operation failed");
    } else {
        warn!(operation, message_id, kind = err.error_code(), error = %err, "Message operation rejected");
    }
}
