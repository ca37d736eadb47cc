//! Repository trait definitions for the domain layer.
//!
//! These traits are the storage contract the services depend on. Concrete
//! implementations live in `crate::infrastructure::persistence`.
//!
//! # Contract
//!
//! - Lookups return `Ok(None)` when the record does not exist; an `Err` is
//!   always an unexpected storage failure.
//! - Inserts are atomic with respect to uniqueness: a row whose key already
//!   exists is rejected with [`RepositoryError::Duplicate`].
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Links keyed by shortened string
//! - [`UserRepository`] - Users keyed by username
//!
//! [`RepositoryError::Duplicate`]: crate::domain::errors::RepositoryError::Duplicate

pub mod link_repository;
pub mod user_repository;

pub use link_repository::LinkRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
