//! API route configuration.
//!
//! Only `POST /link` requires credentials; it reads them through
//! [`crate::api::middleware::BasicAuth`] instead of a route layer.

use crate::api::handlers::{
    create_link_handler, create_user_handler, link_user_handler, redirect_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link and user routes.
///
/// # Endpoints
///
/// - `POST /link`                          - Create a link (Basic auth)
/// - `GET  /link/{shortened_string}`       - 308 redirect to the stored URL
/// - `GET  /link/{shortened_string}/user`  - Owner of a link
/// - `POST /user`                          - Register a user
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/link", post(create_link_handler))
        .route("/link/{shortened_string}", get(redirect_handler))
        .route("/link/{shortened_string}/user", get(link_user_handler))
        .route("/user", post(create_user_handler))
}
