//! HTTP server initialization and runtime setup.
//!
//! Handles storage setup, state wiring, and Axum server lifecycle.

use crate::application::services::LinkService;
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::domain::token_generator::TokenGenerator;
use crate::infrastructure::persistence::{MemoryRepository, PgLinkRepository, PgUserRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::token_generator::RandomTokenGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Link service over the PostgreSQL adapters, as used by the admin CLI.
pub type PgLinkService = LinkService<PgLinkRepository, PgUserRepository, RandomTokenGenerator>;

/// Builds a [`PgLinkService`] honoring the configured token length and
/// attempt limit, so the CLI creates links exactly like the server.
///
/// # Errors
///
/// Returns an error if `TOKEN_LENGTH` is out of range.
pub fn pg_link_service(pool: Arc<PgPool>, config: &Config) -> Result<PgLinkService> {
    let generator = RandomTokenGenerator::new(config.token_length)?;

    Ok(LinkService::new(
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgUserRepository::new(pool)),
        Arc::new(generator),
    )
    .with_max_attempts(config.token_max_attempts))
}

/// Opens a PostgreSQL pool with the configured limits and timeouts.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Builds the shared state for the configured storage backend.
///
/// For postgres this connects and applies pending migrations.
///
/// # Errors
///
/// Returns an error if the token length is invalid, the database is
/// unreachable, or migrations fail.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let generator = Arc::new(RandomTokenGenerator::new(config.token_length)?);
    tracing::debug!(length = generator.length(), "Token generator ready");

    let (link_repository, user_repository): (Arc<dyn LinkRepository>, Arc<dyn UserRepository>) =
        match config.storage {
            StorageBackend::Postgres => {
                let database_url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL must be set for postgres storage")?;

                let pool = connect_pool(config, database_url).await?;
                tracing::info!("Connected to database");

                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .context("Failed to migrate")?;
                tracing::info!("Migrations applied");

                let pool = Arc::new(pool);
                let links: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));
                let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool));
                (links, users)
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage, data is lost on restart");
                let repository = Arc::new(MemoryRepository::new());
                let links: Arc<dyn LinkRepository> = repository.clone();
                let users: Arc<dyn UserRepository> = repository;
                (links, users)
            }
        };

    Ok(AppState::new(
        link_repository,
        user_repository,
        generator,
        config.token_max_attempts,
    ))
}

/// Runs the HTTP server with the given configuration until Ctrl+C.
///
/// # Errors
///
/// Returns an error if:
/// - Storage setup fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
