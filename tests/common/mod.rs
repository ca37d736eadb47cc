#![allow(dead_code)]

use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;
use owned_links::domain::entities::User;
use owned_links::infrastructure::persistence::{
    MemoryRepository, PgLinkRepository, PgUserRepository,
};
use owned_links::routes::app_router;
use owned_links::state::AppState;
use owned_links::utils::token_generator::RandomTokenGenerator;

pub const ALICE: &str = "alice1234";
pub const ALICE_PASSWORD: &str = "password1";
/// `Authorization` value for `alice1234:password1`.
pub const ALICE_AUTH: &str = "Basic YWxpY2UxMjM0OnBhc3N3b3JkMQ==";

pub fn create_memory_state() -> (AppState, Arc<MemoryRepository>) {
    let repo = Arc::new(MemoryRepository::new());
    let generator = Arc::new(RandomTokenGenerator::new(6).unwrap());

    let state = AppState::new(repo.clone(), repo.clone(), generator, 10);

    (state, repo)
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let pool = Arc::new(pool);
    let generator = Arc::new(RandomTokenGenerator::new(6).unwrap());

    AppState::new(
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgUserRepository::new(pool)),
        generator,
        10,
    )
}

/// Test server over the full router, including path normalization.
pub fn test_server(state: AppState) -> TestServer {
    let app = ServiceExt::<Request>::into_make_service(app_router(state));
    TestServer::new(app).unwrap()
}

/// Server over in-memory storage with `alice1234` already registered.
pub async fn server_with_alice() -> (TestServer, Arc<MemoryRepository>) {
    let (state, repo) = create_memory_state();
    state
        .user_service
        .create_user(User::new(ALICE, ALICE_PASSWORD))
        .await
        .unwrap();

    (test_server(state), repo)
}

pub async fn create_test_user(pool: &PgPool, username: &str, password: &str) {
    sqlx::query("INSERT INTO users (username, password) VALUES ($1, $2)")
        .bind(username)
        .bind(password)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_test_link(pool: &PgPool, shortened_string: &str, url: &str, username: &str) {
    sqlx::query("INSERT INTO links (shortened_string, url, username) VALUES ($1, $2, $3)")
        .bind(shortened_string)
        .bind(url)
        .bind(username)
        .execute(pool)
        .await
        .unwrap();
}
