//! Source of candidate shortened strings.

/// Produces random alphanumeric tokens of a fixed length.
///
/// Generation cannot fail; only constructing an implementation can. A token
/// carries no uniqueness guarantee, callers check storage before using it.
///
/// # Implementations
///
/// - [`crate::utils::token_generator::RandomTokenGenerator`] - `rand`-backed generator
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait TokenGenerator: Send + Sync {
    /// Returns a fresh candidate token.
    fn generate(&self) -> String;

    /// Length of every token this generator returns.
    fn length(&self) -> usize;
}
