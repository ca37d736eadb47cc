//! HTTP Basic authentication extractor.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_auth::AuthBasic;
use std::convert::Infallible;

use crate::domain::entities::Credentials;

/// Credentials from the `Authorization: Basic ...` header, if present and well formed.
///
/// Never rejects: handlers validate the body first and only then answer
/// `401 Unauthorized` when no credentials were supplied. A header without a
/// password yields an empty password, which never matches a stored user.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn handler(BasicAuth(credentials): BasicAuth) -> Result<(), AppError> {
///     let credentials = credentials.ok_or_else(missing_credentials)?;
///     // ...
/// }
/// ```
#[derive(Debug)]
pub struct BasicAuth(pub Option<Credentials>);

impl<S> FromRequestParts<S> for BasicAuth
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let credentials = AuthBasic::from_request_parts(parts, &())
            .await
            .ok()
            .map(|AuthBasic((username, password))| {
                Credentials::new(username, password.unwrap_or_default())
            });

        Ok(Self(credentials))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, header};

    async fn extract(value: Option<&str>) -> Option<Credentials> {
        let mut builder = Request::builder().uri("/link");
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();

        let BasicAuth(credentials) = BasicAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        credentials
    }

    #[tokio::test]
    async fn test_valid_header() {
        // alice1234:password1
        let credentials = extract(Some("Basic YWxpY2UxMjM0OnBhc3N3b3JkMQ=="))
            .await
            .unwrap();

        assert_eq!(credentials.username, "alice1234");
        assert_eq!(credentials.password, "password1");
    }

    #[tokio::test]
    async fn test_missing_header() {
        assert!(extract(None).await.is_none());
    }

    #[tokio::test]
    async fn test_wrong_scheme() {
        assert!(extract(Some("Bearer abc")).await.is_none());
    }
}
