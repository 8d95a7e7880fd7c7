//! Domain entities - core business objects

mod message;
mod user;

pub use message::{ChatMessage, NewChatMessage};
pub use user::{NewUser, User};
