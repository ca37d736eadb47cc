//! Repository trait for user data access.

use crate::domain::entities::User;
use crate::domain::errors::RepositoryError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryRepository`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by username, password included.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Backend`] on storage errors.
    async fn find(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Duplicate`] if the username is taken.
    /// Returns [`RepositoryError::Backend`] on storage errors.
    async fn insert(&self, user: &User) -> Result<(), RepositoryError>;

    /// Checks that the underlying storage is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}
