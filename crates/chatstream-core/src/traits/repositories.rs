//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every method is one unit of work: it either
//! commits entirely or leaves no effect.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{ChatMessage, NewChatMessage, NewUser, User};
use crate::error::DomainError;
use crate::value_objects::{MessageId, SortOrder};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Chat Message Repository
// ============================================================================

/// Offset pagination over active messages
///
/// Ordering is `timestamp` in `sort_order`, ties broken by ascending surrogate
/// id, so repeated calls over unchanged data return identical pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageQuery {
    pub sort_order: SortOrder,
    pub offset: i64,
    pub limit: i64,
}

impl MessageQuery {
    /// Query a 1-based page of the given size
    pub fn page(page: i64, page_size: i64, sort_order: SortOrder) -> Self {
        Self {
            sort_order,
            offset: (page - 1).saturating_mul(page_size),
            limit: page_size,
        }
    }

    /// Newest-first top-N query
    pub fn latest(limit: i64) -> Self {
        Self {
            sort_order: SortOrder::Desc,
            offset: 0,
            limit,
        }
    }
}

impl Default for MessageQuery {
    fn default() -> Self {
        Self::latest(50)
    }
}

/// A page of active messages with the active total it was cut from
#[derive(Debug, Clone, PartialEq)]
pub struct MessagePage {
    pub messages: Vec<ChatMessage>,
    pub total: i64,
}

impl MessagePage {
    /// Whether active rows exist beyond this page
    pub fn has_more(&self, offset: i64) -> bool {
        offset + (self.messages.len() as i64) < self.total
    }
}

#[async_trait]
pub trait ChatMessageRepository: Send + Sync {
    /// Insert a new message; fails with `MessageIdExists` on a duplicate `message_id`
    async fn insert(&self, message: &NewChatMessage) -> RepoResult<ChatMessage>;

    /// Find a message by client id, including soft-deleted rows
    async fn find_by_message_id(&self, message_id: &MessageId) -> RepoResult<Option<ChatMessage>>;

    /// List a page of non-deleted messages
    async fn list_active(&self, query: MessageQuery) -> RepoResult<Vec<ChatMessage>>;

    /// Count non-deleted messages
    async fn count_active(&self) -> RepoResult<i64>;

    /// Count and list in one consistent read
    async fn find_active_page(&self, query: MessageQuery) -> RepoResult<MessagePage>;

    /// Replace message content.
    ///
    /// Fails with `MessageNotFound` if missing or deleted and with
    /// `MessageNotEditable` if the message is flagged non-editable.
    async fn update_content(
        &self,
        message_id: &MessageId,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<ChatMessage>;

    /// Atomically add `delta` to the like counter and return the new count.
    ///
    /// Fails with `MessageNotFound` if missing or deleted.
    async fn increment_likes(&self, message_id: &MessageId, delta: i64) -> RepoResult<i64>;

    /// Flag the message deleted. Idempotent; fails only if the row does not exist.
    async fn soft_delete(&self, message_id: &MessageId) -> RepoResult<()>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by surrogate id
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Insert a new user; uniqueness is enforced by the store
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Set or clear the banned flag
    async fn set_banned(&self, id: i64, banned: bool) -> RepoResult<()>;
}
