//! Application layer services implementing business logic.
//!
//! Services consume repository and generator traits and give HTTP handlers
//! and the admin CLI one entry point per use case.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, lookup and ownership
//! - [`services::user_service::UserService`] - User registration
//!
//! Every failure is a [`crate::domain::errors::ServiceError`]; none of them
//! knows about HTTP.

pub mod services;
