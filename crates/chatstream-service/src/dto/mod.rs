//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateMessageRequest, ListMessagesRequest, RecentMessagesRequest, RegisterRequest,
    UpdateMessageRequest, VerifyRequest, DEFAULT_SENDER_NAME,
};

pub use responses::{
    DeleteMessageResponse, HealthChecks, HealthResponse, LikeResponse, MessagePageResponse,
    MessageResponse, ReadinessResponse, RecentMessagesResponse, RegistrationPendingResponse,
    UserResponse,
};
