//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::errors::RepositoryError;
use crate::domain::repositories::LinkRepository;

/// Row shape of the `links` table.
#[derive(Debug, FromRow)]
struct LinkRow {
    shortened_string: String,
    url: String,
    username: String,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(row.shortened_string, row.url, row.username)
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Token uniqueness is enforced by the `links` primary key, so a racing
/// insert surfaces as [`RepositoryError::Duplicate`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find(&self, shortened_string: &str) -> Result<Option<Link>, RepositoryError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT shortened_string, url, username
            FROM links
            WHERE shortened_string = $1
            "#,
        )
        .bind(shortened_string)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn insert(&self, link: &Link) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO links (shortened_string, url, username)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&link.shortened_string)
        .bind(&link.url)
        .bind(&link.username)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
