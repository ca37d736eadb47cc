//! CLI administration tool for owned-links.
//!
//! Provides commands for managing users and links, viewing statistics,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Register a user (prompts for missing values)
//! cargo run --bin admin -- user create --username alice1234
//!
//! # Create a link on behalf of a user
//! cargo run --bin admin -- link create --url https://example.com \
//!     --username alice1234 --password password1
//!
//! # Inspect a link and its owner
//! cargo run --bin admin -- link get Ab3xYz
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same configuration as the server (see `owned_links::config`):
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`
//! - `TOKEN_LENGTH`, `TOKEN_MAX_ATTEMPTS` (optional): generated shortened strings

use owned_links::application::services::UserService;
use owned_links::config::{self, Config, StorageBackend};
use owned_links::domain::entities::{Credentials, User};
use owned_links::domain::errors::ServiceError;
use owned_links::infrastructure::persistence::PgUserRepository;
use owned_links::server::{connect_pool, pg_link_service};
use owned_links::utils::token_generator::{MAX_TOKEN_LENGTH, MIN_TOKEN_LENGTH};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing owned-links.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Register a new user
    Create {
        /// Username (8-40 characters)
        #[arg(short, long)]
        username: Option<String>,

        /// Password (8-40 characters), prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a link owned by the given user
    Create {
        /// Destination URL
        #[arg(long)]
        url: String,

        /// Requested shortened string (generated if omitted)
        #[arg(long)]
        token: Option<String>,

        /// Owner's username
        #[arg(short, long)]
        username: String,

        /// Owner's password, prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Show a link and its owner
    Get {
        /// Shortened string to look up
        shortened_string: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.storage != StorageBackend::Postgres {
        anyhow::bail!("The admin tool requires STORAGE=postgres");
    }
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = connect_pool(&config, database_url).await?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Link { action } => handle_link_action(action, &pool, &config).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));
    let service = UserService::new(repo);

    match action {
        UserAction::Create {
            username,
            password,
            yes,
        } => create_user(&service, username, password, yes).await?,
    }

    Ok(())
}

/// Registers a user with interactive prompts.
///
/// Lengths are checked here the same way the HTTP API checks them.
async fn create_user(
    service: &UserService<PgUserRepository>,
    username: Option<String>,
    password: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Username")
            .validate_with(|input: &String| check_length(input))
            .interact_text()?,
    };
    check_length(&username).map_err(|e| anyhow::anyhow!("Username {}", e))?;

    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?,
    };
    check_length(&password).map_err(|e| anyhow::anyhow!("Password {}", e))?;

    println!("  Username: {}", username.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    match service.create_user(User::new(username.clone(), password)).await {
        Ok(()) => {
            println!("{}", "✅ User created successfully!".green().bold());
            println!();
            println!("{}", "Create a link with:".bright_white());
            println!(
                "  curl -u {}:<password> -H 'content-type: application/json' \\",
                username.bright_yellow()
            );
            println!("    -d '{{\"url\":\"https://example.com\"}}' http://localhost:3000/link");
            println!();
        }
        Err(ServiceError::UsernameTaken) => {
            println!("{}", "⚠️  Username already taken".yellow());
        }
        Err(e) => return Err(e).context("Failed to create user"),
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool, config: &Config) -> Result<()> {
    let service = pg_link_service(Arc::new(pool.clone()), config)?;

    match action {
        LinkAction::Create {
            url,
            token,
            username,
            password,
        } => {
            let password = match password {
                Some(p) => p,
                None => Password::new()
                    .with_prompt(format!("Password for {}", username))
                    .interact()?,
            };

            url::Url::parse(&url).with_context(|| format!("Invalid URL '{}'", url))?;
            if let Some(ref token) = token {
                check_token(token).map_err(|e| anyhow::anyhow!("Token {}", e))?;
            }

            let link = service
                .create_link(url, token, &Credentials::new(username, password))
                .await
                .context("Failed to create link")?;

            println!("{}", "✅ Link created".green().bold());
            println!("  Shortened: {}", link.shortened_string.bright_yellow().bold());
            println!("  URL:       {}", link.url.cyan());
            println!("  Owner:     {}", link.username);
            println!();
        }
        LinkAction::Get { shortened_string } => {
            let link = match service.get_link(&shortened_string).await {
                Ok(link) => link,
                Err(ServiceError::LinkNotFound) => {
                    println!("{}", "⚠️  Link not found".yellow());
                    return Ok(());
                }
                Err(e) => return Err(e).context("Failed to load link"),
            };
            let owner = service
                .get_link_user(&shortened_string)
                .await
                .context("Failed to load link owner")?;

            println!("{}", "🔗 Link".bright_blue().bold());
            println!("  Shortened: {}", link.shortened_string.bright_yellow());
            println!("  URL:       {}", link.url.cyan());
            println!("  Owner:     {}", owner.username);
            println!();
        }
    }

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of users
/// - Total number of links
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    println!(
        "  Users: {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Links: {}",
        links_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

/// Same rule as the HTTP API: 6-32 ASCII letters or digits, counted in characters.
fn check_token(value: &str) -> Result<(), String> {
    let len = value.chars().count();
    if !(MIN_TOKEN_LENGTH..=MAX_TOKEN_LENGTH).contains(&len) {
        return Err(format!(
            "must be {}-{} characters, got {}",
            MIN_TOKEN_LENGTH, MAX_TOKEN_LENGTH, len
        ));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("must be alphanumeric, got '{}'", value));
    }

    Ok(())
}

/// Same rule as the HTTP API: 8-40 characters, not bytes.
fn check_length(value: &str) -> Result<(), String> {
    let len = value.chars().count();
    if (8..=40).contains(&len) {
        Ok(())
    } else {
        Err(format!("must be 8-40 characters, got {}", len))
    }
}
