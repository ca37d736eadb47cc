//! Error taxonomy of the domain layer.
//!
//! [`ServiceError`] is what the services return. It carries only a kind and,
//! for storage failures, the original cause plus the call site that hit it.
//! Mapping kinds to transport status codes is the presentation layer's job
//! (see [`crate::error::AppError`]).

use std::error::Error as StdError;
use thiserror::Error;

/// Failure raised by a repository adapter.
///
/// "Not found" is not an error here: lookups return `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// An insert hit the storage-level uniqueness constraint.
    #[error("duplicate key{}", constraint_suffix(.constraint))]
    Duplicate { constraint: Option<String> },

    /// A link references an owner that storage cannot find.
    #[error("owner `{username}` of an existing link is missing")]
    MissingOwner { username: String },

    /// Any other storage failure, kept opaque.
    #[error(transparent)]
    Backend(Box<dyn StdError + Send + Sync>),
}

impl RepositoryError {
    /// Wraps an arbitrary storage error.
    pub fn backend(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

fn constraint_suffix(constraint: &Option<String>) -> String {
    constraint
        .as_deref()
        .map(|c| format!(" ({c})"))
        .unwrap_or_default()
}

/// Classification of a [`ServiceError`], free of any transport concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LinkNotFound,
    UserNotFound,
    UsernameTaken,
    IncorrectPassword,
    UsedShortenedString,
    TokenSpaceExhausted,
    RepositoryFailure,
}

/// Error returned by the link and user services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("link not found")]
    LinkNotFound,

    #[error("user not found")]
    UserNotFound,

    #[error("username taken")]
    UsernameTaken,

    #[error("incorrect password")]
    IncorrectPassword,

    #[error("used shortened string")]
    UsedShortenedString,

    #[error("no free shortened string after {attempts} attempts")]
    TokenSpaceExhausted { attempts: usize },

    /// Opaque storage failure with the operation and repository call that hit it.
    #[error("{context}: {source}")]
    Repository {
        context: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl ServiceError {
    pub fn repository(context: &'static str, source: RepositoryError) -> Self {
        Self::Repository { context, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LinkNotFound => ErrorKind::LinkNotFound,
            Self::UserNotFound => ErrorKind::UserNotFound,
            Self::UsernameTaken => ErrorKind::UsernameTaken,
            Self::IncorrectPassword => ErrorKind::IncorrectPassword,
            Self::UsedShortenedString => ErrorKind::UsedShortenedString,
            Self::TokenSpaceExhausted { .. } => ErrorKind::TokenSpaceExhausted,
            Self::Repository { .. } => ErrorKind::RepositoryFailure,
        }
    }
}

/// Rejected generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("token length must be between {min} and {max}, got {length}")]
    InvalidLength {
        length: usize,
        min: usize,
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_context_is_kept_in_message() {
        let err = ServiceError::repository(
            "get_link: repository.find_link",
            RepositoryError::backend(std::io::Error::other("connection reset")),
        );

        assert_eq!(err.kind(), ErrorKind::RepositoryFailure);
        assert_eq!(
            err.to_string(),
            "get_link: repository.find_link: connection reset"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_duplicate_message() {
        let named = RepositoryError::Duplicate {
            constraint: Some("links_pkey".to_string()),
        };
        let unnamed = RepositoryError::Duplicate { constraint: None };

        assert_eq!(named.to_string(), "duplicate key (links_pkey)");
        assert_eq!(unnamed.to_string(), "duplicate key");
        assert!(named.is_duplicate());
    }

    #[test]
    fn test_domain_kinds() {
        assert_eq!(ServiceError::LinkNotFound.kind(), ErrorKind::LinkNotFound);
        assert_eq!(
            ServiceError::UsedShortenedString.kind(),
            ErrorKind::UsedShortenedString
        );
        assert_eq!(
            ServiceError::TokenSpaceExhausted { attempts: 3 }.kind(),
            ErrorKind::TokenSpaceExhausted
        );
    }
}
