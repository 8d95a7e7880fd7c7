//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use chatstream_common::AppError;
use chatstream_core::DomainError;
use std::fmt;
use validator::ValidationErrors;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or store failure
    Domain(DomainError),

    /// Application error (hashing, config)
    App(AppError),

    /// Validation error
    Validation(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_forbidden() {
                    403
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else if e.is_retryable() {
                    503
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
            Self::Validation(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses and log events
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the caller may retry the same request unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_retryable())
    }

    /// Message safe to return to callers
    pub fn public_message(&self) -> String {
        match self {
            Self::Domain(e) => e.public_message(),
            Self::App(AppError::Domain(e)) => e.public_message(),
            Self::App(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Validation(_) => self.to_string(),
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        Self::Validation(messages.join("; "))
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chatstream_core::MessageId;
    use validator::Validate;

    fn mid() -> MessageId {
        MessageId::parse("msg_1_00000001").unwrap()
    }

    #[test]
    fn test_domain_status_codes() {
        assert_eq!(ServiceError::from(DomainError::MessageNotFound(mid())).status_code(), 404);
        assert_eq!(ServiceError::from(DomainError::MessageNotEditable(mid())).status_code(), 403);
        assert_eq!(ServiceError::from(DomainError::MessageIdExists(mid())).status_code(), 409);
        assert_eq!(ServiceError::from(DomainError::StoreTimeout).status_code(), 503);
    }

    #[test]
    fn test_validation_error() {
        let err = ServiceError::validation("Invalid page");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_retryable_only_for_store_failures() {
        assert!(ServiceError::from(DomainError::StoreTimeout).is_retryable());
        assert!(ServiceError::from(DomainError::StoreUnavailable("x".into())).is_retryable());
        assert!(!ServiceError::from(DomainError::MessageNotFound(mid())).is_retryable());
        assert!(!ServiceError::internal("boom").is_retryable());
    }

    #[test]
    fn test_public_message_hides_internal_detail() {
        let err = ServiceError::internal("mailer socket closed");
        assert!(!err.public_message().contains("socket"));

        let err = ServiceError::from(DomainError::StoreUnavailable("10.0.0.3 refused".into()));
        assert!(!err.public_message().contains("10.0.0.3"));
    }

    #[test]
    fn test_from_validation_errors() {
        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 1, message = "Content must not be empty"))]
            content: String,
        }

        let errors = Probe {
            content: String::new(),
        }
        .validate()
        .unwrap_err();
        let err = ServiceError::from(errors);
        assert_eq!(err.to_string(), "Validation error: Content must not be empty");
    }

    #[test]
    fn test_convert_to_app_error() {
        let app_err: AppError = ServiceError::from(DomainError::UserBanned).into();
        assert_eq!(app_err.status_code(), 403);
    }
}
