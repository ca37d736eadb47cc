//! Helpers shared across layers.
//!
//! - [`token_generator`] - Random alphanumeric shortened strings
//! - [`db_error`] - SQLx error classification

pub mod db_error;
pub mod token_generator;
