//! User entity - a verified account

use chrono::{DateTime, Utc};

/// User account committed after verification
///
/// Messages reference users weakly through `sender_id`; the display name on a
/// message is independent of `username`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if the user may be referenced as a message sender
    #[inline]
    pub fn can_post(&self) -> bool {
        !self.is_banned
    }
}

/// Values for inserting a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    /// Opaque hashed credential (PHC string)
    pub hashed_password: String,
}

impl NewUser {
    pub fn new(username: String, email: String, hashed_password: String) -> Self {
        Self {
            username,
            email,
            hashed_password,
        }
    }

    /// Materialize the stored row for a given surrogate id and store time
    pub fn into_user(self, id: i64, now: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            is_banned: false,
            created_at: now,
        }
    }
}
