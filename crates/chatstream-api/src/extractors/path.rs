//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use chatstream_core::MessageId;

use crate::response::ApiError;

/// `:message_id` path segment parsed into a `MessageId`
#[derive(Debug, Clone)]
pub struct MessageIdPath(pub MessageId);

impl MessageIdPath {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MessageIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        MessageId::parse(&raw)
            .map(MessageIdPath)
            .map_err(|e| ApiError::invalid_path(format!("Invalid message_id: {e}")))
    }
}
