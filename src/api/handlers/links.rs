//! Handlers for link creation and ownership lookup.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse, LinkUserResponse};
use crate::api::middleware::BasicAuth;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a link owned by the authenticated user.
///
/// # Endpoint
///
/// `POST /link` with `Authorization: Basic <base64(username:password)>`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "shortened_string": "mylink1" }
/// ```
///
/// `shortened_string` is optional; when absent or empty a random token is
/// generated.
///
/// # Errors
///
/// - 400 if the body fails validation (checked before credentials)
/// - 401 if credentials are missing, the user is unknown, or the password is wrong
/// - 409 if the requested `shortened_string` is already used
pub async fn create_link_handler(
    State(state): State<AppState>,
    BasicAuth(credentials): BasicAuth,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<Json<LinkResponse>, AppError> {
    let Json(payload) = payload?;
    let payload = payload.normalized();
    payload.validate()?;

    let credentials = credentials.ok_or_else(|| {
        AppError::unauthorized(
            "Unauthorized",
            json!({"reason": "Authorization header is missing or invalid"}),
        )
    })?;

    let link = state
        .link_service
        .create_link(payload.url, payload.shortened_string, &credentials)
        .await?;

    Ok(Json(link.into()))
}

/// Returns the owner of a link, without the password.
///
/// # Endpoint
///
/// `GET /link/{shortened_string}/user`
///
/// # Errors
///
/// Returns 404 if the link does not exist.
pub async fn link_user_handler(
    State(state): State<AppState>,
    Path(shortened_string): Path<String>,
) -> Result<Json<LinkUserResponse>, AppError> {
    let user = state.link_service.get_link_user(&shortened_string).await?;

    Ok(Json(user.into()))
}
