//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage on PostgreSQL
//! - [`PgUserRepository`] - User storage on PostgreSQL
//! - [`MemoryRepository`] - Both contracts in process, for tests and local runs

pub mod memory;
pub mod pg_link_repository;
pub mod pg_user_repository;

pub use memory::MemoryRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;
