//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in chatstream-core,
//! plus in-process implementations used by tests and local development.

mod error;
mod memory;
mod message;
mod user;

pub use memory::{MemoryChatMessageRepository, MemoryUserRepository};
pub use message::PgChatMessageRepository;
pub use user::PgUserRepository;
