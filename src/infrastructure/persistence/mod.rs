//! SQLite repository implementations.
//!
//! Concrete implementations of the domain repository traits on top of a
//! shared `sqlx` connection pool.
//!
//! - [`SqliteLinkRepository`] - Link storage and retrieval
//! - [`SqliteClickRepository`] - Click recording and counting
//! - [`database`] - Pool construction and embedded migrations

pub mod database;
pub mod sqlite_click_repository;
pub mod sqlite_link_repository;

pub use database::{MIGRATOR, connect, run_migrations};
pub use sqlite_click_repository::SqliteClickRepository;
pub use sqlite_link_repository::SqliteLinkRepository;
