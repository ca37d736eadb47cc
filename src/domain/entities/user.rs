//! User entity and caller-supplied credentials.

use std::fmt;

/// An account that owns links.
///
/// The password is stored in plain form and compared literally. Any move to
/// hashed credentials belongs in the repository adapter, not here.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
}

impl User {
    /// Creates a new User instance.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns a copy of the user with the password cleared.
    pub fn without_password(mut self) -> Self {
        self.password.clear();
        self
    }

    /// Returns true if the supplied password equals the stored one.
    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Username and password as presented by a caller.
///
/// Unlike [`User`], nothing here is known to exist in storage.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_password_clears_only_password() {
        let user = User::new("alice1234", "password1").without_password();

        assert_eq!(user.username, "alice1234");
        assert!(user.password.is_empty());
    }

    #[test]
    fn test_password_matches_is_exact() {
        let user = User::new("alice1234", "password1");

        assert!(user.password_matches("password1"));
        assert!(!user.password_matches("Password1"));
        assert!(!user.password_matches("password1 "));
        assert!(!user.password_matches(""));
    }

    #[test]
    fn test_debug_redacts_password() {
        let user = User::new("alice1234", "password1");
        let creds = Credentials::new("alice1234", "password1");

        assert!(!format!("{:?}", user).contains("password1"));
        assert!(!format!("{:?}", creds).contains("password1"));
    }
}
