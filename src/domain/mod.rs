//! Domain layer containing business entities and contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation.
//! Services in [`crate::application::services`] orchestrate it.
//!
//! # Architecture
//!
//! - [`entities`] - Users, credentials and links
//! - [`repositories`] - Storage contracts implemented by the infrastructure layer
//! - [`token_generator`] - Contract for random shortened strings
//! - [`errors`] - Service, repository and generator errors

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod token_generator;
