//! PostgreSQL implementation of ChatMessageRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;
use tracing::instrument;

use chatstream_core::entities::{ChatMessage, NewChatMessage};
use chatstream_core::error::DomainError;
use chatstream_core::traits::{ChatMessageRepository, MessagePage, MessageQuery, RepoResult};
use chatstream_core::value_objects::MessageId;

use crate::models::ChatMessageModel;

use super::error::{
    check_like_delta, map_db_error, map_foreign_key_violation, map_out_of_range,
    map_unique_violation, message_not_found, CHAT_MESSAGES_MESSAGE_ID_KEY,
};

/// PostgreSQL implementation of ChatMessageRepository
#[derive(Clone)]
pub struct PgChatMessageRepository {
    pool: PgPool,
}

impl PgChatMessageRepository {
    /// Create a new PgChatMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one page of active rows with a stable order
    async fn fetch_page<'e, E>(executor: E, query: MessageQuery) -> RepoResult<Vec<ChatMessage>>
    where
        E: PgExecutor<'e>,
    {
        let offset = query.offset.max(0);
        let limit = query.limit.max(0);

        // the direction is a closed keyword, never caller text
        let sql = format!(
            r#"
            SELECT id, message_id, sender_id, sender_name, content, message_type, alt_text,
                   timestamp, likes, is_editable, show_buttons, custom_buttons, is_deleted,
                   created_at, updated_at
            FROM chat_messages
            WHERE is_deleted = FALSE
            ORDER BY timestamp {}, id ASC
            OFFSET $1
            LIMIT $2
            "#,
            query.sort_order.as_sql()
        );

        let rows = sqlx::query_as::<_, ChatMessageModel>(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(executor)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ChatMessage::from).collect())
    }

    async fn fetch_count<'e, E>(executor: E) -> RepoResult<i64>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM chat_messages WHERE is_deleted = FALSE
            "#,
        )
        .fetch_one(executor)
        .await
        .map_err(map_db_error)
    }
}

#[async_trait]
impl ChatMessageRepository for PgChatMessageRepository {
    #[instrument(skip(self, message), fields(message_id = %message.message_id))]
    async fn insert(&self, message: &NewChatMessage) -> RepoResult<ChatMessage> {
        let row = sqlx::query_as::<_, ChatMessageModel>(
            r#"
            INSERT INTO chat_messages (
                message_id, sender_id, sender_name, content, message_type, alt_text,
                timestamp, is_editable, show_buttons, custom_buttons
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, message_id, sender_id, sender_name, content, message_type, alt_text,
                      timestamp, likes, is_editable, show_buttons, custom_buttons, is_deleted,
                      created_at, updated_at
            "#,
        )
        .bind(message.message_id.as_str())
        .bind(message.sender_id)
        .bind(&message.sender_name)
        .bind(&message.content)
        .bind(message.message_type.as_str())
        .bind(&message.alt_text)
        .bind(message.timestamp)
        .bind(message.is_editable)
        .bind(message.show_buttons)
        .bind(message.custom_buttons.clone())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation())
            {
                let sender_id = message.sender_id.unwrap_or_default();
                return map_foreign_key_violation(e, || DomainError::UserNotFound(sender_id));
            }
            map_unique_violation(e, |constraint| match constraint {
                Some(CHAT_MESSAGES_MESSAGE_ID_KEY) | None => {
                    Some(DomainError::MessageIdExists(message.message_id.clone()))
                }
                Some(_) => None,
            })
        })?;

        Ok(ChatMessage::from(row))
    }

    #[instrument(skip(self))]
    async fn find_by_message_id(&self, message_id: &MessageId) -> RepoResult<Option<ChatMessage>> {
        let result = sqlx::query_as::<_, ChatMessageModel>(
            r#"
            SELECT id, message_id, sender_id, sender_name, content, message_type, alt_text,
                   timestamp, likes, is_editable, show_buttons, custom_buttons, is_deleted,
                   created_at, updated_at
            FROM chat_messages
            WHERE message_id = $1
            "#,
        )
        .bind(message_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChatMessage::from))
    }

    #[instrument(skip(self))]
    async fn list_active(&self, query: MessageQuery) -> RepoResult<Vec<ChatMessage>> {
        Self::fetch_page(&self.pool, query).await
    }

    #[instrument(skip(self))]
    async fn count_active(&self) -> RepoResult<i64> {
        Self::fetch_count(&self.pool).await
    }

    #[instrument(skip(self))]
    async fn find_active_page(&self, query: MessageQuery) -> RepoResult<MessagePage> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // count and rows must come from the same snapshot
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let total = Self::fetch_count(&mut *tx).await?;
        let messages = Self::fetch_page(&mut *tx, query).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(MessagePage { messages, total })
    }

    #[instrument(skip(self, content))]
    async fn update_content(
        &self,
        message_id: &MessageId,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> RepoResult<ChatMessage> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let flags = sqlx::query_as::<_, (bool, bool)>(
            r#"
            SELECT is_deleted, is_editable
            FROM chat_messages
            WHERE message_id = $1
            FOR UPDATE
            "#,
        )
        .bind(message_id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        match flags {
            None | Some((true, _)) => return Err(message_not_found(message_id)),
            Some((false, false)) => {
                return Err(DomainError::MessageNotEditable(message_id.clone()))
            }
            Some((false, true)) => {}
        }

        let row = sqlx::query_as::<_, ChatMessageModel>(
            r#"
            UPDATE chat_messages
            SET content = $2, updated_at = $3
            WHERE message_id = $1
            RETURNING id, message_id, sender_id, sender_name, content, message_type, alt_text,
                      timestamp, likes, is_editable, show_buttons, custom_buttons, is_deleted,
                      created_at, updated_at
            "#,
        )
        .bind(message_id.as_str())
        .bind(content)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(ChatMessage::from(row))
    }

    #[instrument(skip(self))]
    async fn increment_likes(&self, message_id: &MessageId, delta: i64) -> RepoResult<i64> {
        check_like_delta(delta)?;

        // single statement: the row lock serializes concurrent increments
        let likes = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE chat_messages
            SET likes = likes + $2, updated_at = NOW()
            WHERE message_id = $1 AND is_deleted = FALSE
            RETURNING likes
            "#,
        )
        .bind(message_id.as_str())
        .bind(delta)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_out_of_range(e, || DomainError::LikesOverflow(message_id.clone())))?;

        likes.ok_or_else(|| message_not_found(message_id))
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, message_id: &MessageId) -> RepoResult<()> {
        let deleted = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE chat_messages
            SET is_deleted = TRUE,
                updated_at = CASE WHEN is_deleted THEN updated_at ELSE NOW() END
            WHERE message_id = $1
            RETURNING message_id
            "#,
        )
        .bind(message_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match deleted {
            Some(_) => Ok(()),
            None => Err(message_not_found(message_id)),
        }
    }
}
