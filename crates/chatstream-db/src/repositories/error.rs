//! Error handling utilities for repositories

use chatstream_core::error::DomainError;
use chatstream_core::value_objects::MessageId;
use sqlx::Error as SqlxError;

/// Unique constraint names from the schema
pub const USERS_USERNAME_KEY: &str = "users_username_key";
pub const USERS_EMAIL_KEY: &str = "users_email_key";
pub const CHAT_MESSAGES_MESSAGE_ID_KEY: &str = "chat_messages_message_id_key";

/// Convert SQLx error to DomainError
///
/// Driver detail is logged here and withheld from callers.
pub fn map_db_error(e: SqlxError) -> DomainError {
    match e {
        SqlxError::PoolTimedOut => {
            tracing::warn!(kind = "pool_timeout", "Timed out acquiring a store connection");
            DomainError::StoreTimeout
        }
        other => {
            tracing::error!(kind = "store_unavailable", error = %other, "Store operation failed");
            DomainError::StoreUnavailable(other.to_string())
        }
    }
}

/// Map a unique violation by constraint name, falling back to `map_db_error`
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> Option<DomainError>,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if let Some(mapped) = on_unique(db_err.constraint()) {
                return mapped;
            }
        }
    }
    map_db_error(e)
}

/// Map a foreign key violation, falling back to `map_db_error`
pub fn map_foreign_key_violation<F>(e: SqlxError, on_fk: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_fk();
        }
    }
    map_db_error(e)
}

/// SQLSTATE for `numeric_value_out_of_range`
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

/// Map an integer overflow in the statement, falling back to `map_db_error`
pub fn map_out_of_range<F>(e: SqlxError, on_overflow: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE) {
            return on_overflow();
        }
    }
    map_db_error(e)
}

/// Create a "message not found" error
pub fn message_not_found(id: &MessageId) -> DomainError {
    DomainError::MessageNotFound(id.clone())
}

/// Create a "user not found" error
pub fn user_not_found(id: i64) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Reject a negative like delta before touching the store
pub fn check_like_delta(delta: i64) -> Result<(), DomainError> {
    if delta < 0 {
        return Err(DomainError::ValidationError(
            "Like delta must be non-negative".to_string(),
        ));
    }
    Ok(())
}
