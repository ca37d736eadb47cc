//! Random shortened-string generation.

use rand::Rng;

use crate::domain::errors::GeneratorError;
use crate::domain::token_generator::TokenGenerator;

/// Characters a generated token is drawn from.
const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Shortest token length accepted at construction.
pub const MIN_TOKEN_LENGTH: usize = 6;

/// Longest token length accepted at construction.
pub const MAX_TOKEN_LENGTH: usize = 32;

/// Generates tokens by sampling [`CHARSET`] uniformly per position.
///
/// Uses the thread-local `rand` generator, which is fast but not meant for
/// secrets. Tokens are public identifiers so that is enough.
#[derive(Debug, Clone, Copy)]
pub struct RandomTokenGenerator {
    length: usize,
}

impl RandomTokenGenerator {
    /// Creates a generator for tokens of exactly `length` characters.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidLength`] if `length` is outside
    /// `[MIN_TOKEN_LENGTH, MAX_TOKEN_LENGTH]`.
    pub fn new(length: usize) -> Result<Self, GeneratorError> {
        if !(MIN_TOKEN_LENGTH..=MAX_TOKEN_LENGTH).contains(&length) {
            return Err(GeneratorError::InvalidLength {
                length,
                min: MIN_TOKEN_LENGTH,
                max: MAX_TOKEN_LENGTH,
            });
        }

        Ok(Self { length })
    }
}

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();

        (0..self.length)
            .map(|_| {
                let idx = rng.random_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect()
    }

    fn length(&self) -> usize {
        self.length
    }
}
