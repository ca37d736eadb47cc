//! DTOs for user endpoints.

use serde::Deserialize;
use std::fmt;
use validator::Validate;

use crate::domain::entities::User;

/// Request to register a user.
#[derive(Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 8, max = 40, message = "Must be 8-40 characters"))]
    pub username: String,

    #[validate(length(min = 8, max = 40, message = "Must be 8-40 characters"))]
    pub password: String,
}

impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl From<CreateUserRequest> for User {
    fn from(req: CreateUserRequest) -> Self {
        User::new(req.username, req.password)
    }
}
