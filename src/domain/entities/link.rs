//! Link entity representing a shortened URL mapping.

/// A shortened token mapped to a destination URL.
///
/// `shortened_string` is unique across all links and `username` names the
/// single owner, fixed at creation. Links are never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub shortened_string: String,
    pub url: String,
    pub username: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        shortened_string: impl Into<String>,
        url: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            shortened_string: shortened_string.into(),
            url: url.into(),
            username: username.into(),
        }
    }
}
