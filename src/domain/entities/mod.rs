//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Business rules around them (ownership,
//! uniqueness, credential checks) live in [`crate::application::services`].
//!
//! # Entity Types
//!
//! - [`User`] - An account that owns links
//! - [`Credentials`] - A username/password pair claimed by a caller
//! - [`Link`] - A shortened token mapped to a destination URL

pub mod link;
pub mod user;

pub use link::Link;
pub use user::{Credentials, User};
