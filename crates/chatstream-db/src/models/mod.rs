//! Database models - SQLx-compatible structs for PostgreSQL tables

mod message;
mod user;

pub use message::ChatMessageModel;
pub use user::UserModel;
