//! # chatstream-core
//!
//! Domain layer containing the chat message and user entities, value objects,
//! and the store traits the persistence layer implements.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{ChatMessage, NewChatMessage, NewUser, User};
pub use error::DomainError;
pub use traits::{ChatMessageRepository, MessagePage, MessageQuery, RepoResult, UserRepository};
pub use value_objects::{
    MessageId, MessageIdGenerator, MessageIdParseError, MessageType, SortOrder,
    SortOrderParseError,
};
