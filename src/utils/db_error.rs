//! Translation of SQLx errors into repository errors.

use crate::domain::errors::RepositoryError;

/// Returns true if `e` is a unique-constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation(&e) {
            let constraint = e
                .as_database_error()
                .and_then(|db_err| db_err.constraint())
                .map(str::to_string);
            return RepositoryError::Duplicate { constraint };
        }

        RepositoryError::backend(e)
    }
}
