//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Validation runs before any service is called.

pub mod health;
pub mod link;
pub mod user;
