//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::MessageId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),

    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Registration not found or expired")]
    RegistrationNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Forbidden Errors
    // =========================================================================
    #[error("Message is not editable: {0}")]
    MessageNotEditable(MessageId),

    #[error("User is banned")]
    UserBanned,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Message id already exists: {0}")]
    MessageIdExists(MessageId),

    #[error("Username already in use")]
    UsernameTaken,

    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Like count is at its maximum: {0}")]
    LikesOverflow(MessageId),

    // =========================================================================
    // Transient Store Errors (retryable)
    // =========================================================================
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Store operation timed out")]
    StoreTimeout,
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::RegistrationNotFound => "UNKNOWN_REGISTRATION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Forbidden
            Self::MessageNotEditable(_) => "MESSAGE_NOT_EDITABLE",
            Self::UserBanned => "USER_BANNED",

            // Conflict
            Self::MessageIdExists(_) => "MESSAGE_ID_EXISTS",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::LikesOverflow(_) => "LIKES_OVERFLOW",

            // Transient
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::StoreTimeout => "STORE_TIMEOUT",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MessageNotFound(_) | Self::UserNotFound(_) | Self::RegistrationNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if this is a forbidden error
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::MessageNotEditable(_) | Self::UserBanned)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::MessageIdExists(_)
                | Self::UsernameTaken
                | Self::EmailAlreadyExists
                | Self::LikesOverflow(_)
        )
    }

    /// Check if the operation may be retried as-is
    ///
    /// Store operations are all-or-nothing, so a transient failure left no
    /// partial effect behind.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_) | Self::StoreTimeout)
    }

    /// Message safe to show to callers (store internals are withheld)
    pub fn public_message(&self) -> String {
        match self {
            Self::StoreUnavailable(_) => "Store temporarily unavailable, please retry".to_string(),
            other => other.to_string(),
        }
    }
}
