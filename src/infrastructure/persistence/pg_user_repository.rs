//! PostgreSQL implementation of user repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::errors::RepositoryError;
use crate::domain::repositories::UserRepository;

#[derive(Debug, FromRow)]
struct UserRow {
    username: String,
    password: String,
}

/// PostgreSQL repository for user accounts.
///
/// Passwords are stored as given. Hashing, if ever added, belongs here so
/// the services keep comparing what they receive.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT username, password
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| User::new(r.username, r.password)))
    }

    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            "#,
        )
        .bind(&user.username)
        .bind(&user.password)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;

        Ok(())
    }
}
