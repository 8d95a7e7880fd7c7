//! Message ID - client-durable string identity of a chat message
//!
//! Format produced by the generator: `msg_<unix millis>_<8 hex chars>`.
//! The millisecond prefix keeps ids roughly time-ordered; the random suffix
//! makes collisions within one millisecond practically impossible.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Client-facing message identity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Prefix used by generated ids
    pub const PREFIX: &'static str = "msg_";

    /// Maximum accepted length (matches the column width)
    pub const MAX_LEN: usize = 64;

    /// Parse a client-supplied id.
    ///
    /// Any non-empty string without whitespace up to `MAX_LEN` characters is
    /// accepted, so ids minted by older clients stay addressable.
    pub fn parse(s: &str) -> Result<Self, MessageIdParseError> {
        if s.is_empty() {
            return Err(MessageIdParseError::Empty);
        }
        if s.chars().count() > Self::MAX_LEN {
            return Err(MessageIdParseError::TooLong { max: Self::MAX_LEN });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(MessageIdParseError::InvalidCharacter);
        }
        Ok(Self(s.to_string()))
    }

    /// Wrap a value read back from the store without re-validating it
    pub fn from_trusted(s: String) -> Self {
        Self(s)
    }

    /// Borrow the inner string
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for MessageId {
    type Err = MessageIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageId::parse(s)
    }
}

impl AsRef<str> for MessageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Error when parsing a MessageId from a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MessageIdParseError {
    #[error("message id must not be empty")]
    Empty,

    #[error("message id too long: max {max} characters")]
    TooLong { max: usize },

    #[error("message id must not contain whitespace")]
    InvalidCharacter,
}

/// Thread-safe message id generator
///
/// The millisecond component never moves backwards for a given generator,
/// even if the wall clock does.
#[derive(Debug, Default)]
pub struct MessageIdGenerator {
    last_millis: AtomicI64,
}

impl MessageIdGenerator {
    /// Create a new generator
    pub fn new() -> Self {
        Self {
            last_millis: AtomicI64::new(0),
        }
    }

    /// Generate a new message id
    pub fn generate(&self) -> MessageId {
        let millis = self.next_millis();
        let suffix: u32 = rand::thread_rng().gen();
        MessageId(format!("{}{millis}_{suffix:08x}", MessageId::PREFIX))
    }

    fn next_millis(&self) -> i64 {
        let now = current_millis();
        // fetch_max returns the previous value; the id uses whichever is larger
        let previous = self.last_millis.fetch_max(now, Ordering::AcqRel);
        now.max(previous)
    }
}

#[inline]
fn current_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
