//! # chatstream-db
//!
//! Store layer implementing the repository traits from `chatstream-core`.
//!
//! ## Overview
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model to entity mappers
//! - PostgreSQL repositories plus an in-process store with the same guarantees
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chatstream_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use chatstream_db::repositories::PgChatMessageRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool, "./crates/chatstream-db/migrations").await?;
//!     let messages = PgChatMessageRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    MemoryChatMessageRepository, MemoryUserRepository, PgChatMessageRepository,
    PgUserRepository,
};
