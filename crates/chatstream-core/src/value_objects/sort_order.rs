//! Display sort order for message listings

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction on the message `timestamp`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    /// Newest first
    #[default]
    Desc,
}

impl SortOrder {
    /// SQL keyword for this direction
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    #[inline]
    pub fn is_desc(self) -> bool {
        matches!(self, Self::Desc)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = SortOrderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(SortOrderParseError(other.to_string())),
        }
    }
}

/// Error when parsing a SortOrder
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sort order '{0}', expected 'asc' or 'desc'")]
pub struct SortOrderParseError(pub String);
