//! Handler for user registration.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::user::CreateUserRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new user.
///
/// # Endpoint
///
/// `POST /user`
///
/// ```json
/// { "username": "alice1234", "password": "password1" }
/// ```
///
/// Answers `200 OK` with an empty body.
///
/// # Errors
///
/// - 400 if either field is outside 8-40 characters
/// - 409 if the username is already taken
pub async fn create_user_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    state.user_service.create_user(payload.into()).await?;

    Ok(StatusCode::OK)
}
