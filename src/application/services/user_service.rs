//! User registration service.

use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::errors::ServiceError;
use crate::domain::repositories::UserRepository;

/// Service for registering users.
///
/// Users are created once and never updated or deleted.
pub struct UserService<U: UserRepository + ?Sized> {
    repository: Arc<U>,
}

impl<U: UserRepository + ?Sized> UserService<U> {
    /// Creates a new user service.
    pub fn new(repository: Arc<U>) -> Self {
        Self { repository }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::UsernameTaken`] if the username already exists,
    /// including when a concurrent registration wins the insert.
    /// Returns [`ServiceError::Repository`] on storage errors.
    pub async fn create_user(&self, user: User) -> Result<(), ServiceError> {
        if self
            .repository
            .find(&user.username)
            .await
            .map_err(|e| ServiceError::repository("create_user: repository.find_user", e))?
            .is_some()
        {
            return Err(ServiceError::UsernameTaken);
        }

        match self.repository.insert(&user).await {
            Ok(()) => {
                tracing::info!(username = %user.username, "User created");
                Ok(())
            }
            Err(e) if e.is_duplicate() => Err(ServiceError::UsernameTaken),
            Err(e) => Err(ServiceError::repository(
                "create_user: repository.insert_user",
                e,
            )),
        }
    }

    /// Checks that user storage is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Repository`] if the storage does not answer.
    pub async fn health_check(&self) -> Result<(), ServiceError> {
        self.repository
            .ping()
            .await
            .map_err(|e| ServiceError::repository("health_check: repository.ping", e))
    }
}
