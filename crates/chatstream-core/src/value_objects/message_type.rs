//! Message type tag - open set of content kinds

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Kind of message content
///
/// The set is open: unknown tags are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum MessageType {
    #[default]
    Text,
    Markdown,
    Image,
    System,
    Other(String),
}

impl MessageType {
    /// Wire/storage representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Markdown => "markdown",
            Self::Image => "image",
            Self::System => "system",
            Self::Other(tag) => tag,
        }
    }

    /// Check if the message carries an image payload
    #[inline]
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image)
    }
}

impl From<&str> for MessageType {
    fn from(tag: &str) -> Self {
        match tag {
            "text" => Self::Text,
            "markdown" => Self::Markdown,
            "image" => Self::Image,
            "system" => Self::System,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for MessageType {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MessageType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MessageType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from(tag))
    }
}
