//! Message handlers
//!
//! Endpoints for message operations.

use axum::{extract::State, Json};
use chatstream_service::dto::{
    CreateMessageRequest, DeleteMessageResponse, LikeResponse, ListMessagesRequest,
    MessagePageResponse, MessageResponse, RecentMessagesRequest, RecentMessagesResponse,
    UpdateMessageRequest,
};
use chatstream_service::MessageService;

use crate::extractors::{MessageIdPath, OptionalValidatedJson, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List messages, one page at a time
///
/// GET /api/messages?page=&page_size=&sort_order=
pub async fn list_messages(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListMessagesRequest>,
) -> ApiResult<Json<MessagePageResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service.list_messages(query).await?;
    Ok(Json(response))
}

/// Newest messages, body form
///
/// POST /api/messages/recent
pub async fn recent_messages(
    State(state): State<AppState>,
    OptionalValidatedJson(request): OptionalValidatedJson<RecentMessagesRequest>,
) -> ApiResult<Json<RecentMessagesResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service
        .recent_messages(request.unwrap_or_default())
        .await?;
    Ok(Json(response))
}

/// Newest messages, query form
///
/// GET /api/messages/recent?limit=
pub async fn recent_messages_query(
    State(state): State<AppState>,
    ValidatedQuery(request): ValidatedQuery<RecentMessagesRequest>,
) -> ApiResult<Json<RecentMessagesResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service.recent_messages(request).await?;
    Ok(Json(response))
}

/// Create message
///
/// POST /api/messages
pub async fn create_message(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service.create_message(request).await?;
    Ok(Created(Json(response)))
}

/// Get message by ID
///
/// GET /api/messages/{message_id}
pub async fn get_message(
    State(state): State<AppState>,
    message_id: MessageIdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service.get_message(message_id.as_str()).await?;
    Ok(Json(response))
}

/// Edit message content
///
/// PUT /api/messages/{message_id}
pub async fn update_message(
    State(state): State<AppState>,
    message_id: MessageIdPath,
    ValidatedJson(request): ValidatedJson<UpdateMessageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service
        .update_message(message_id.as_str(), request)
        .await?;
    Ok(Json(response))
}

/// Like message
///
/// POST /api/messages/{message_id}/like
pub async fn like_message(
    State(state): State<AppState>,
    message_id: MessageIdPath,
) -> ApiResult<Json<LikeResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service.like_message(message_id.as_str()).await?;
    Ok(Json(response))
}

/// Soft-delete message
///
/// DELETE /api/messages/{message_id}
pub async fn delete_message(
    State(state): State<AppState>,
    message_id: MessageIdPath,
) -> ApiResult<Json<DeleteMessageResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service.delete_message(message_id.as_str()).await?;
    Ok(Json(response))
}
