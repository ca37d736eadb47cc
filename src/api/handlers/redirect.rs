//! Handler for short link redirect.

use axum::{
    extract::{Path, State},
    http::HeaderValue,
    response::Redirect,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a shortened string to its destination URL.
///
/// # Endpoint
///
/// `GET /link/{shortened_string}`
///
/// Answers `308 Permanent Redirect` with the stored URL in `Location`.
///
/// # Errors
///
/// Returns 404 Not Found if the shortened string doesn't exist.
/// Returns 500 if the stored URL cannot be used as a `Location` header.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(shortened_string): Path<String>,
) -> Result<Redirect, AppError> {
    let link = state.link_service.get_link(&shortened_string).await?;

    if HeaderValue::from_str(&link.url).is_err() {
        tracing::error!(
            shortened_string = %link.shortened_string,
            "Stored URL is not a valid Location header"
        );
        return Err(AppError::internal("Internal server error", json!({})));
    }

    tracing::debug!(shortened_string = %link.shortened_string, "Redirecting");

    Ok(Redirect::permanent(&link.url))
}
