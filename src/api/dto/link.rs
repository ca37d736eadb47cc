//! DTOs for link endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

use crate::domain::entities::{Link, User};

/// Compiled regex for requested shortened strings.
static SHORTENED_STRING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

/// Request to create a link owned by the authenticated caller.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Destination URL (must be absolute).
    #[validate(url(message = "Invalid URL format"))]
    #[validate(custom(function = "validate_no_whitespace"))]
    pub url: String,

    /// Optional requested token. Empty is treated as absent.
    #[validate(length(min = 6, max = 32, message = "Must be 6-32 characters"))]
    #[validate(regex(path = "*SHORTENED_STRING_REGEX", message = "Must be alphanumeric"))]
    #[serde(default)]
    pub shortened_string: Option<String>,
}

impl CreateLinkRequest {
    /// Drops an empty `shortened_string` so it is treated as not supplied.
    pub fn normalized(mut self) -> Self {
        self.shortened_string = self.shortened_string.filter(|s| !s.is_empty());
        self
    }
}

/// Rejects URLs containing whitespace or control characters.
///
/// `url::Url::parse` strips tabs and newlines before parsing, so such input
/// passes the `url` check but can never be sent back in a `Location` header.
fn validate_no_whitespace(url: &str) -> Result<(), ValidationError> {
    if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        let mut err = ValidationError::new("url_whitespace");
        err.message = Some("URL must not contain whitespace or control characters".into());
        return Err(err);
    }

    Ok(())
}

/// A created link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub shortened_string: String,
    pub url: String,
    pub username: String,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            shortened_string: link.shortened_string,
            url: link.url,
            username: link.username,
        }
    }
}

/// Owner of a link. Never carries the password.
#[derive(Debug, Serialize)]
pub struct LinkUserResponse {
    pub username: String,
}

impl From<User> for LinkUserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
        }
    }
}
