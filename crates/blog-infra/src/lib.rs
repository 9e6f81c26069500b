//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//! This crate contains the database, the in-memory store and mail delivery.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `http-mail` - Mail relay over HTTP via reqwest

pub mod database;
pub mod mail;
pub mod memory;

// Re-exports - In-Memory
pub use mail::{InMemoryMailer, LogMailer};
pub use memory::{
    InMemoryCommentRepository, InMemoryPostRepository, InMemoryTagRepository,
    InMemoryUserRepository, MemoryDatabase,
};

// Re-exports - External services
pub use database::DatabaseConfig;
#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConnections, PostgresCommentRepository, PostgresPostRepository,
    PostgresTagRepository, PostgresUserRepository,
};
#[cfg(feature = "http-mail")]
pub use mail::HttpMailer;
