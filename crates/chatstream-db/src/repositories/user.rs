//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use chatstream_core::entities::{NewUser, User};
use chatstream_core::error::DomainError;
use chatstream_core::traits::{RepoResult, UserRepository};

use crate::models::UserModel;

use super::error::{
    map_db_error, map_unique_violation, user_not_found, USERS_EMAIL_KEY, USERS_USERNAME_KEY,
};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, hashed_password, is_banned, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, hashed_password, is_banned, created_at
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let row = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (username, email, hashed_password)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, hashed_password, is_banned, created_at
            ",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| match constraint {
                Some(USERS_USERNAME_KEY) => Some(DomainError::UsernameTaken),
                Some(USERS_EMAIL_KEY) => Some(DomainError::EmailAlreadyExists),
                _ => None,
            })
        })?;

        Ok(User::from(row))
    }

    #[instrument(skip(self))]
    async fn set_banned(&self, id: i64, banned: bool) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET is_banned = $2
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(banned)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }
}
