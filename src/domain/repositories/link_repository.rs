//! Repository trait for link data access.

use crate::domain::entities::Link;
use crate::domain::errors::RepositoryError;
use async_trait::async_trait;

/// Repository interface for shortened links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryRepository`] - In-process store
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its shortened string.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Backend`] on storage errors.
    async fn find(&self, shortened_string: &str) -> Result<Option<Link>, RepositoryError>;

    /// Stores a new link.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Duplicate`] if the shortened string is taken.
    /// Returns [`RepositoryError::Backend`] on storage errors.
    async fn insert(&self, link: &Link) -> Result<(), RepositoryError>;
}
