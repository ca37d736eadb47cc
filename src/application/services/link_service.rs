//! Link creation and retrieval service.

use std::sync::Arc;

use crate::domain::entities::{Credentials, Link, User};
use crate::domain::errors::{RepositoryError, ServiceError};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::domain::token_generator::TokenGenerator;

/// Default number of generated tokens tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Service for creating and resolving owned short links.
///
/// Holds no state of its own: every call reads and writes through the
/// repositories, and nothing is cached between calls.
///
/// # Ordering
///
/// `create_link` always authenticates the owner first. A request with an
/// unknown user or a wrong password never reaches token lookup or generation.
pub struct LinkService<L, U, G>
where
    L: LinkRepository + ?Sized,
    U: UserRepository + ?Sized,
    G: TokenGenerator + ?Sized,
{
    link_repository: Arc<L>,
    user_repository: Arc<U>,
    generator: Arc<G>,
    max_attempts: usize,
}

impl<L, U, G> LinkService<L, U, G>
where
    L: LinkRepository + ?Sized,
    U: UserRepository + ?Sized,
    G: TokenGenerator + ?Sized,
{
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, user_repository: Arc<U>, generator: Arc<G>) -> Self {
        Self {
            link_repository,
            user_repository,
            generator,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets how many generated tokens are tried before failing.
    ///
    /// Values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Number of generated tokens tried before failing.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Length of generated tokens.
    pub fn token_length(&self) -> usize {
        self.generator.length()
    }

    /// Retrieves a link by its shortened string.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::LinkNotFound`] if no link has this token.
    /// Returns [`ServiceError::Repository`] on storage errors.
    pub async fn get_link(&self, shortened_string: &str) -> Result<Link, ServiceError> {
        self.link_repository
            .find(shortened_string)
            .await
            .map_err(|e| ServiceError::repository("get_link: repository.find_link", e))?
            .ok_or(ServiceError::LinkNotFound)
    }

    /// Retrieves the owner of a link, with the password cleared.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::LinkNotFound`] if no link has this token.
    /// Returns [`ServiceError::Repository`] on storage errors, including an
    /// owner that storage cannot find for an existing link.
    pub async fn get_link_user(&self, shortened_string: &str) -> Result<User, ServiceError> {
        let link = self
            .link_repository
            .find(shortened_string)
            .await
            .map_err(|e| ServiceError::repository("get_link_user: repository.find_link", e))?
            .ok_or(ServiceError::LinkNotFound)?;

        let owner = self
            .user_repository
            .find(&link.username)
            .await
            .map_err(|e| ServiceError::repository("get_link_user: repository.find_user", e))?
            .ok_or_else(|| {
                ServiceError::repository(
                    "get_link_user: repository.find_user",
                    RepositoryError::MissingOwner {
                        username: link.username.clone(),
                    },
                )
            })?;

        Ok(owner.without_password())
    }

    /// Creates a link owned by the authenticated caller.
    ///
    /// # Arguments
    ///
    /// - `url` - Destination, already validated as an absolute URL
    /// - `shortened_string` - Requested token; `None` or empty means generate one
    /// - `credentials` - Caller's claimed username and password
    ///
    /// # Code Generation
    ///
    /// A generated token is checked against storage and regenerated on
    /// collision, up to the configured number of attempts.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::UserNotFound`] if the username does not exist.
    /// Returns [`ServiceError::IncorrectPassword`] if the password does not match.
    /// Returns [`ServiceError::UsedShortenedString`] if the requested token is taken.
    /// Returns [`ServiceError::TokenSpaceExhausted`] if every generated token collided.
    /// Returns [`ServiceError::Repository`] on storage errors.
    pub async fn create_link(
        &self,
        url: String,
        shortened_string: Option<String>,
        credentials: &Credentials,
    ) -> Result<Link, ServiceError> {
        let owner = self.authenticate(credentials).await?;

        let link = match shortened_string.filter(|s| !s.is_empty()) {
            Some(requested) => {
                self.create_with_requested(url, requested, owner.username)
                    .await?
            }
            None => self.create_with_generated(url, owner.username).await?,
        };

        tracing::info!(
            shortened_string = %link.shortened_string,
            username = %link.username,
            "Link created"
        );

        Ok(link)
    }

    /// Loads the claimed user and compares passwords literally.
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, ServiceError> {
        let user = self
            .user_repository
            .find(&credentials.username)
            .await
            .map_err(|e| ServiceError::repository("create_link: repository.find_user", e))?
            .ok_or(ServiceError::UserNotFound)?;

        if !user.password_matches(&credentials.password) {
            tracing::debug!(username = %credentials.username, "Password mismatch");
            return Err(ServiceError::IncorrectPassword);
        }

        Ok(user)
    }

    async fn create_with_requested(
        &self,
        url: String,
        shortened_string: String,
        username: String,
    ) -> Result<Link, ServiceError> {
        if self
            .link_repository
            .find(&shortened_string)
            .await
            .map_err(|e| ServiceError::repository("create_link: repository.find_link", e))?
            .is_some()
        {
            return Err(ServiceError::UsedShortenedString);
        }

        let link = Link::new(shortened_string, url, username);

        match self.link_repository.insert(&link).await {
            Ok(()) => Ok(link),
            // Lost a race with a concurrent insert of the same token.
            Err(e) if e.is_duplicate() => Err(ServiceError::UsedShortenedString),
            Err(e) => Err(ServiceError::repository(
                "create_link: repository.insert_link",
                e,
            )),
        }
    }

    async fn create_with_generated(
        &self,
        url: String,
        username: String,
    ) -> Result<Link, ServiceError> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate();

            if self
                .link_repository
                .find(&candidate)
                .await
                .map_err(|e| ServiceError::repository("create_link: repository.find_link", e))?
                .is_some()
            {
                tracing::warn!(attempt, "Generated shortened string already used, retrying");
                continue;
            }

            let link = Link::new(candidate, url.clone(), username.clone());

            match self.link_repository.insert(&link).await {
                Ok(()) => return Ok(link),
                Err(e) if e.is_duplicate() => {
                    tracing::warn!(attempt, "Generated shortened string taken on insert, retrying");
                }
                Err(e) => {
                    return Err(ServiceError::repository(
                        "create_link: repository.insert_link",
                        e,
                    ));
                }
            }
        }

        Err(ServiceError::TokenSpaceExhausted {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ErrorKind;
    use crate::domain::repositories::{MockLinkRepository, MockUserRepository};
    use crate::domain::token_generator::MockTokenGenerator;
    use mockall::Sequence;

    fn stored_user() -> User {
        User::new("alice1234", "password1")
    }

    fn credentials() -> Credentials {
        Credentials::new("alice1234", "password1")
    }

    fn backend_error(message: &str) -> RepositoryError {
        RepositoryError::backend(std::io::Error::other(message.to_string()))
    }

    fn service(
        links: MockLinkRepository,
        users: MockUserRepository,
        generator: MockTokenGenerator,
    ) -> LinkService<MockLinkRepository, MockUserRepository, MockTokenGenerator> {
        LinkService::new(Arc::new(links), Arc::new(users), Arc::new(generator))
    }

    fn users_with_alice() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users
            .expect_find()
            .withf(|username| username == "alice1234")
            .times(1)
            .returning(|_| Ok(Some(stored_user())));
        users
    }

    #[tokio::test]
    async fn test_get_link_success() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find()
            .withf(|token| token == "abc123")
            .times(1)
            .returning(|_| Ok(Some(Link::new("abc123", "https://example.com", "alice1234"))));

        let service = service(links, MockUserRepository::new(), MockTokenGenerator::new());

        let link = service.get_link("abc123").await.unwrap();

        assert_eq!(link, Link::new("abc123", "https://example.com", "alice1234"));
    }

    #[tokio::test]
    async fn test_get_link_not_found() {
        let mut links = MockLinkRepository::new();
        links.expect_find().times(1).returning(|_| Ok(None));

        let service = service(links, MockUserRepository::new(), MockTokenGenerator::new());

        let result = service.get_link("missing1").await;

        assert!(matches!(result, Err(ServiceError::LinkNotFound)));
    }

    #[tokio::test]
    async fn test_get_link_repository_failure_keeps_context() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find()
            .times(1)
            .returning(|_| Err(backend_error("boom")));

        let service = service(links, MockUserRepository::new(), MockTokenGenerator::new());

        let err = service.get_link("abc123").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RepositoryFailure);
        assert_eq!(err.to_string(), "get_link: repository.find_link: boom");
    }

    #[tokio::test]
    async fn test_get_link_user_clears_password() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find()
            .times(1)
            .returning(|_| Ok(Some(Link::new("abc123", "https://example.com", "alice1234"))));

        let service = service(links, users_with_alice(), MockTokenGenerator::new());

        let user = service.get_link_user("abc123").await.unwrap();

        assert_eq!(user.username, "alice1234");
        assert!(user.password.is_empty());
    }

    #[tokio::test]
    async fn test_get_link_user_link_not_found() {
        let mut links = MockLinkRepository::new();
        links.expect_find().times(1).returning(|_| Ok(None));

        let service = service(links, MockUserRepository::new(), MockTokenGenerator::new());

        let result = service.get_link_user("missing1").await;

        assert!(matches!(result, Err(ServiceError::LinkNotFound)));
    }

    #[tokio::test]
    async fn test_get_link_user_missing_owner_is_repository_failure() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find()
            .times(1)
            .returning(|_| Ok(Some(Link::new("abc123", "https://example.com", "ghost1234"))));

        let mut users = MockUserRepository::new();
        users.expect_find().times(1).returning(|_| Ok(None));

        let service = service(links, users, MockTokenGenerator::new());

        let err = service.get_link_user("abc123").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RepositoryFailure);
        assert!(matches!(
            err,
            ServiceError::Repository {
                source: RepositoryError::MissingOwner { .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_get_link_user_owner_lookup_failure() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find()
            .times(1)
            .returning(|_| Ok(Some(Link::new("abc123", "https://example.com", "alice1234"))));

        let mut users = MockUserRepository::new();
        users
            .expect_find()
            .times(1)
            .returning(|_| Err(backend_error("timeout")));

        let service = service(links, users, MockTokenGenerator::new());

        let err = service.get_link_user("abc123").await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "get_link_user: repository.find_user: timeout"
        );
    }

    #[tokio::test]
    async fn test_create_link_user_not_found_touches_nothing_else() {
        let mut users = MockUserRepository::new();
        users.expect_find().times(1).returning(|_| Ok(None));

        // No expectations: any link lookup or generation panics.
        let service = service(MockLinkRepository::new(), users, MockTokenGenerator::new());

        let result = service
            .create_link("https://example.com".to_string(), None, &credentials())
            .await;

        assert!(matches!(result, Err(ServiceError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_create_link_incorrect_password_touches_nothing_else() {
        let service = service(
            MockLinkRepository::new(),
            users_with_alice(),
            MockTokenGenerator::new(),
        );

        let result = service
            .create_link(
                "https://example.com".to_string(),
                Some("mytoken1".to_string()),
                &Credentials::new("alice1234", "wrong-password"),
            )
            .await;

        assert!(matches!(result, Err(ServiceError::IncorrectPassword)));
    }

    #[tokio::test]
    async fn test_create_link_user_lookup_failure() {
        let mut users = MockUserRepository::new();
        users
            .expect_find()
            .times(1)
            .returning(|_| Err(backend_error("down")));

        let service = service(MockLinkRepository::new(), users, MockTokenGenerator::new());

        let err = service
            .create_link("https://example.com".to_string(), None, &credentials())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "create_link: repository.find_user: down");
    }

    #[tokio::test]
    async fn test_create_link_with_requested_token() {
        let mut links = MockLinkRepository::new();
        let mut seq = Sequence::new();
        links
            .expect_find()
            .withf(|token| token == "mytoken1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        links
            .expect_insert()
            .withf(|link| {
                link.shortened_string == "mytoken1"
                    && link.url == "https://example.com"
                    && link.username == "alice1234"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let service = service(links, users_with_alice(), MockTokenGenerator::new());

        let link = service
            .create_link(
                "https://example.com".to_string(),
                Some("mytoken1".to_string()),
                &credentials(),
            )
            .await
            .unwrap();

        assert_eq!(link.shortened_string, "mytoken1");
        assert_eq!(link.username, "alice1234");
    }

    #[tokio::test]
    async fn test_create_link_requested_token_used_by_anyone() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find()
            .times(1)
            .returning(|_| Ok(Some(Link::new("mytoken1", "https://other.com", "someone99"))));

        let service = service(links, users_with_alice(), MockTokenGenerator::new());

        let result = service
            .create_link(
                "https://example.com".to_string(),
                Some("mytoken1".to_string()),
                &credentials(),
            )
            .await;

        assert!(matches!(result, Err(ServiceError::UsedShortenedString)));
    }

    #[tokio::test]
    async fn test_create_link_requested_token_lost_race() {
        let mut links = MockLinkRepository::new();
        links.expect_find().times(1).returning(|_| Ok(None));
        links.expect_insert().times(1).returning(|_| {
            Err(RepositoryError::Duplicate {
                constraint: Some("links_pkey".to_string()),
            })
        });

        let service = service(links, users_with_alice(), MockTokenGenerator::new());

        let result = service
            .create_link(
                "https://example.com".to_string(),
                Some("mytoken1".to_string()),
                &credentials(),
            )
            .await;

        assert!(matches!(result, Err(ServiceError::UsedShortenedString)));
    }

    #[tokio::test]
    async fn test_create_link_requested_token_lookup_failure() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find()
            .times(1)
            .returning(|_| Err(backend_error("broken")));

        let service = service(links, users_with_alice(), MockTokenGenerator::new());

        let err = service
            .create_link(
                "https://example.com".to_string(),
                Some("mytoken1".to_string()),
                &credentials(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "create_link: repository.find_link: broken");
    }

    #[tokio::test]
    async fn test_create_link_empty_token_means_generate() {
        let mut generator = MockTokenGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .return_const("x3Tq9Z".to_string());

        let mut links = MockLinkRepository::new();
        links
            .expect_find()
            .withf(|token| token == "x3Tq9Z")
            .times(1)
            .returning(|_| Ok(None));
        links.expect_insert().times(1).returning(|_| Ok(()));

        let service = service(links, users_with_alice(), generator);

        let link = service
            .create_link(
                "https://example.com".to_string(),
                Some(String::new()),
                &credentials(),
            )
            .await
            .unwrap();

        assert_eq!(link.shortened_string, "x3Tq9Z");
        assert_eq!(link.username, "alice1234");
    }

    #[tokio::test]
    async fn test_create_link_uses_stored_username() {
        let mut users = MockUserRepository::new();
        users
            .expect_find()
            .times(1)
            .returning(|_| Ok(Some(User::new("Alice1234", "password1"))));

        let mut generator = MockTokenGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .return_const("x3Tq9Z".to_string());

        let mut links = MockLinkRepository::new();
        links.expect_find().times(1).returning(|_| Ok(None));
        links
            .expect_insert()
            .withf(|link| link.username == "Alice1234")
            .times(1)
            .returning(|_| Ok(()));

        let service = service(links, users, generator);

        let link = service
            .create_link(
                "https://example.com".to_string(),
                None,
                &Credentials::new("alice1234", "password1"),
            )
            .await
            .unwrap();

        assert_eq!(link.username, "Alice1234");
    }

    #[tokio::test]
    async fn test_create_link_retries_generated_collision() {
        let mut seq = Sequence::new();
        let mut generator = MockTokenGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .return_const("taken1".to_string());
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .return_const("free12".to_string());

        let mut links = MockLinkRepository::new();
        links
            .expect_find()
            .withf(|token| token == "taken1")
            .times(1)
            .returning(|_| Ok(Some(Link::new("taken1", "https://other.com", "someone99"))));
        links
            .expect_find()
            .withf(|token| token == "free12")
            .times(1)
            .returning(|_| Ok(None));
        links
            .expect_insert()
            .withf(|link| link.shortened_string == "free12")
            .times(1)
            .returning(|_| Ok(()));

        let service = service(links, users_with_alice(), generator);

        let link = service
            .create_link("https://example.com".to_string(), None, &credentials())
            .await
            .unwrap();

        assert_eq!(link.shortened_string, "free12");
    }

    #[tokio::test]
    async fn test_create_link_retries_duplicate_on_insert() {
        let mut seq = Sequence::new();
        let mut generator = MockTokenGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .return_const("raced1".to_string());
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .return_const("free12".to_string());

        let mut links = MockLinkRepository::new();
        links.expect_find().times(2).returning(|_| Ok(None));
        links
            .expect_insert()
            .withf(|link| link.shortened_string == "raced1")
            .times(1)
            .returning(|_| Err(RepositoryError::Duplicate { constraint: None }));
        links
            .expect_insert()
            .withf(|link| link.shortened_string == "free12")
            .times(1)
            .returning(|_| Ok(()));

        let service = service(links, users_with_alice(), generator);

        let link = service
            .create_link("https://example.com".to_string(), None, &credentials())
            .await
            .unwrap();

        assert_eq!(link.shortened_string, "free12");
    }

    #[tokio::test]
    async fn test_create_link_token_space_exhausted() {
        let mut generator = MockTokenGenerator::new();
        generator
            .expect_generate()
            .times(3)
            .return_const("taken1".to_string());

        let mut links = MockLinkRepository::new();
        links
            .expect_find()
            .times(3)
            .returning(|_| Ok(Some(Link::new("taken1", "https://other.com", "someone99"))));

        let service = service(links, users_with_alice(), generator).with_max_attempts(3);

        let result = service
            .create_link("https://example.com".to_string(), None, &credentials())
            .await;

        assert!(matches!(
            result,
            Err(ServiceError::TokenSpaceExhausted { attempts: 3 })
        ));
    }

    #[tokio::test]
    async fn test_create_link_insert_failure() {
        let mut generator = MockTokenGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .return_const("x3Tq9Z".to_string());

        let mut links = MockLinkRepository::new();
        links.expect_find().times(1).returning(|_| Ok(None));
        links
            .expect_insert()
            .times(1)
            .returning(|_| Err(backend_error("disk full")));

        let service = service(links, users_with_alice(), generator);

        let err = service
            .create_link("https://example.com".to_string(), None, &credentials())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "create_link: repository.insert_link: disk full"
        );
    }

    #[test]
    fn test_with_max_attempts_floor() {
        let service = service(
            MockLinkRepository::new(),
            MockUserRepository::new(),
            MockTokenGenerator::new(),
        )
        .with_max_attempts(0);

        assert_eq!(service.max_attempts, 1);
    }
}
