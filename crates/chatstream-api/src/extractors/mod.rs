//! Axum extractors for request handling
//!
//! Custom extractors for validated bodies, validated query strings and path ids.

mod path;
mod query;
mod validated;

pub use path::MessageIdPath;
pub use query::ValidatedQuery;
pub use validated::{OptionalValidatedJson, ValidatedJson};
