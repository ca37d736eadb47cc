//! HTTP-facing error type.
//!
//! Services report a [`ServiceError`] kind; this module alone decides which
//! status code each kind becomes.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;
use validator::ValidationErrors;

use crate::domain::errors::{ErrorKind, ServiceError};

/// Realm advertised in `WWW-Authenticate` on 401 responses.
const AUTH_REALM: &str = r#"Basic realm="shortener""#;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its JSON body representation.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::Unauthorized { message, details } => ("unauthorized", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.to_error_info();
        write!(f, "{}: {}", info.code, info.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(AUTH_REALM),
            );
        }

        response
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::bad_request(
            "Validation failed",
            serde_json::to_value(&errors).unwrap_or_default(),
        )
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request("Invalid JSON body", json!({"reason": rejection.body_text()}))
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err.kind() {
            ErrorKind::LinkNotFound => AppError::not_found("Link not found", json!({})),
            // Unknown user and wrong password look the same to the caller.
            ErrorKind::UserNotFound | ErrorKind::IncorrectPassword => {
                AppError::unauthorized("Invalid username or password", json!({}))
            }
            ErrorKind::UsernameTaken => AppError::conflict("Username already taken", json!({})),
            ErrorKind::UsedShortenedString => {
                AppError::conflict("Shortened string already used", json!({}))
            }
            ErrorKind::TokenSpaceExhausted | ErrorKind::RepositoryFailure => {
                tracing::error!(error = %err, "Request failed");
                AppError::internal("Internal server error", json!({}))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;

    #[test]
    fn test_service_errors_map_to_status() {
        let cases = [
            (ServiceError::LinkNotFound, StatusCode::NOT_FOUND),
            (ServiceError::UserNotFound, StatusCode::UNAUTHORIZED),
            (ServiceError::IncorrectPassword, StatusCode::UNAUTHORIZED),
            (ServiceError::UsernameTaken, StatusCode::CONFLICT),
            (ServiceError::UsedShortenedString, StatusCode::CONFLICT),
            (
                ServiceError::TokenSpaceExhausted { attempts: 10 },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn test_internal_error_hides_cause() {
        let err = ServiceError::repository(
            "get_link: repository.find_link",
            RepositoryError::backend(std::io::Error::other("password=hunter2")),
        );

        let info = AppError::from(err).to_error_info();

        assert_eq!(info.code, "internal_error");
        assert!(!info.message.contains("hunter2"));
        assert_eq!(info.details, json!({}));
    }

    #[test]
    fn test_unauthorized_response_has_challenge() {
        let response = AppError::unauthorized("Unauthorized", json!({})).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    }

    #[test]
    fn test_display() {
        let err = AppError::conflict("Username already taken", json!({}));

        assert_eq!(err.to_string(), "conflict: Username already taken");
    }
}
