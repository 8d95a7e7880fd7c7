//! Store traits (ports) implemented by the persistence layer

mod repositories;

pub use repositories::{ChatMessageRepository, MessagePage, MessageQuery, RepoResult, UserRepository};
