//! In-process repository backed by hash maps.

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, User};
use crate::domain::errors::RepositoryError;
use crate::domain::repositories::{LinkRepository, UserRepository};

/// Repository keeping users and links in memory.
///
/// Implements both [`UserRepository`] and [`LinkRepository`] with the same
/// guarantees as the PostgreSQL adapters: inserts are atomic with respect to
/// key uniqueness, and a link cannot reference an unknown user. Data is lost
/// when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    users: RwLock<HashMap<String, User>>,
    links: RwLock<HashMap<String, Link>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub async fn link_count(&self) -> usize {
        self.links.read().await.len()
    }

    /// Number of stored users.
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for MemoryRepository {
    async fn find(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        match self.users.write().await.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::Duplicate {
                constraint: Some("users_pkey".to_string()),
            }),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[async_trait]
impl LinkRepository for MemoryRepository {
    async fn find(&self, shortened_string: &str) -> Result<Option<Link>, RepositoryError> {
        Ok(self.links.read().await.get(shortened_string).cloned())
    }

    async fn insert(&self, link: &Link) -> Result<(), RepositoryError> {
        if !self.users.read().await.contains_key(&link.username) {
            return Err(RepositoryError::backend(std::io::Error::other(format!(
                "links_username_fkey: user `{}` does not exist",
                link.username
            ))));
        }

        match self.links.write().await.entry(link.shortened_string.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::Duplicate {
                constraint: Some("links_pkey".to_string()),
            }),
            Entry::Vacant(slot) => {
                slot.insert(link.clone());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo_with_alice() -> MemoryRepository {
        let repo = MemoryRepository::new();
        UserRepository::insert(&repo, &User::new("alice1234", "password1"))
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn test_user_roundtrip() {
        let repo = repo_with_alice().await;

        let user = UserRepository::find(&repo, "alice1234").await.unwrap();

        assert_eq!(user, Some(User::new("alice1234", "password1")));
        assert!(UserRepository::find(&repo, "bob12345").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_user_rejected() {
        let repo = repo_with_alice().await;

        let err = UserRepository::insert(&repo, &User::new("alice1234", "other-pass"))
            .await
            .unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(repo.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_link_rejected() {
        let repo = repo_with_alice().await;
        let link = Link::new("abc123", "https://example.com", "alice1234");

        LinkRepository::insert(&repo, &link).await.unwrap();
        let err = LinkRepository::insert(&repo, &link).await.unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(repo.link_count().await, 1);
    }

    #[tokio::test]
    async fn test_link_requires_existing_owner() {
        let repo = MemoryRepository::new();
        let link = Link::new("abc123", "https://example.com", "ghost1234");

        let err = LinkRepository::insert(&repo, &link).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Backend(_)));
    }
}
