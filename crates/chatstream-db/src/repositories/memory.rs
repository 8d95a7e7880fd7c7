//! In-process repositories
//!
//! Same guarantees as the PostgreSQL implementations: each call is atomic
//! under a single write lock, deleted rows stay addressable, and uniqueness
//! is enforced on insert. Data is lost on restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use chatstream_core::entities::{ChatMessage, NewChatMessage, NewUser, User};
use chatstream_core::error::DomainError;
use chatstream_core::traits::{
    ChatMessageRepository, MessagePage, MessageQuery, RepoResult, UserRepository,
};
use chatstream_core::value_objects::{MessageId, SortOrder};

use super::error::{check_like_delta, message_not_found, user_not_found};

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Default)]
struct MessageTable {
    next_id: i64,
    rows: HashMap<MessageId, ChatMessage>,
}

impl MessageTable {
    fn active_sorted(&self, sort_order: SortOrder) -> Vec<&ChatMessage> {
        let mut active: Vec<&ChatMessage> = self.rows.values().filter(|m| m.is_active()).collect();
        active.sort_by(|a, b| {
            let by_time = a.timestamp.total_cmp(&b.timestamp);
            let by_time = match sort_order {
                SortOrder::Asc => by_time,
                SortOrder::Desc => by_time.reverse(),
            };
            by_time.then(a.id.cmp(&b.id))
        });
        active
    }

    fn page(&self, query: MessageQuery) -> Vec<ChatMessage> {
        let offset = usize::try_from(query.offset).unwrap_or(0);
        let limit = usize::try_from(query.limit).unwrap_or(0);
        self.active_sorted(query.sort_order)
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    fn active_count(&self) -> i64 {
        self.rows.values().filter(|m| m.is_active()).count() as i64
    }
}

/// In-process chat message store
#[derive(Debug, Clone, Default)]
pub struct MemoryChatMessageRepository {
    table: Arc<RwLock<MessageTable>>,
    users: Option<MemoryUserRepository>,
}

impl MemoryChatMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enforce that `sender_id` references an existing user, like the FK does
    pub fn with_users(mut self, users: MemoryUserRepository) -> Self {
        self.users = Some(users);
        self
    }

    /// Number of rows including soft-deleted ones
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ChatMessageRepository for MemoryChatMessageRepository {
    async fn insert(&self, message: &NewChatMessage) -> RepoResult<ChatMessage> {
        if let (Some(users), Some(sender_id)) = (&self.users, message.sender_id) {
            if users.find_by_id(sender_id).await?.is_none() {
                return Err(user_not_found(sender_id));
            }
        }

        let mut table = self.table.write().await;
        if table.rows.contains_key(&message.message_id) {
            return Err(DomainError::MessageIdExists(message.message_id.clone()));
        }

        table.next_id += 1;
        let row = message.clone().into_message(table.next_id, Utc::now());
        table.rows.insert(row.message_id.clone(), row.clone());
        Ok(row)
    }

    async fn find_by_message_id(&self, message_id: &MessageId) -> RepoResult<Option<ChatMessage>> {
        Ok(self.table.read().await.rows.get(message_id).cloned())
    }

    async fn list_active(&self, query: MessageQuery) -> RepoResult<Vec<ChatMessage>> {
        Ok(self.table.read().await.page(query))
    }

    async fn count_active(&self) -> RepoResult<i64> {
        Ok(self.table.read().await.active_count())
    }

    async fn find_active_page(&self, query: MessageQuery) -> RepoResult<MessagePage> {
        let table = self.table.read().await;
        Ok(MessagePage {
            messages: table.page(query),
            total: table.active_count(),
        })
    }

    async fn update_content(
        &self,
        message_id: &MessageId,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<ChatMessage> {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .get_mut(message_id)
            .filter(|m| m.is_active())
            .ok_or_else(|| message_not_found(message_id))?;

        if !row.is_editable {
            return Err(DomainError::MessageNotEditable(message_id.clone()));
        }

        row.content = content.to_string();
        row.updated_at = updated_at;
        Ok(row.clone())
    }

    async fn increment_likes(&self, message_id: &MessageId, delta: i64) -> RepoResult<i64> {
        check_like_delta(delta)?;

        let mut table = self.table.write().await;
        let row = table
            .rows
            .get_mut(message_id)
            .filter(|m| m.is_active())
            .ok_or_else(|| message_not_found(message_id))?;

        row.likes = row
            .likes
            .checked_add(delta)
            .ok_or_else(|| DomainError::LikesOverflow(message_id.clone()))?;
        row.updated_at = Utc::now();
        Ok(row.likes)
    }

    async fn soft_delete(&self, message_id: &MessageId) -> RepoResult<()> {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .get_mut(message_id)
            .ok_or_else(|| message_not_found(message_id))?;

        if !row.is_deleted {
            row.is_deleted = true;
            row.updated_at = Utc::now();
        }
        Ok(())
    }
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Default)]
struct UserTable {
    next_id: i64,
    rows: HashMap<i64, User>,
}

/// In-process user store
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let mut table = self.table.write().await;
        if table.rows.values().any(|u| u.username == user.username) {
            return Err(DomainError::UsernameTaken);
        }
        if table.rows.values().any(|u| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }

        table.next_id += 1;
        let row = user.clone().into_user(table.next_id, Utc::now());
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn set_banned(&self, id: i64, banned: bool) -> RepoResult<()> {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&id).ok_or_else(|| user_not_found(id))?;
        row.is_banned = banned;
        Ok(())
    }
}
