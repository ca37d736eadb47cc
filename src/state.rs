//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, UserService};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::domain::token_generator::TokenGenerator;

/// Link service over type-erased collaborators.
pub type DynLinkService = LinkService<dyn LinkRepository, dyn UserRepository, dyn TokenGenerator>;

/// User service over a type-erased repository.
pub type DynUserService = UserService<dyn UserRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    pub user_service: Arc<DynUserService>,
}

impl AppState {
    /// Wires services over the given collaborators.
    ///
    /// `max_attempts` bounds the generate-and-check loop of link creation.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        user_repository: Arc<dyn UserRepository>,
        generator: Arc<dyn TokenGenerator>,
        max_attempts: usize,
    ) -> Self {
        let link_service =
            LinkService::new(link_repository, user_repository.clone(), generator)
                .with_max_attempts(max_attempts);
        let user_service = UserService::new(user_repository);

        Self {
            link_service: Arc::new(link_service),
            user_service: Arc::new(user_service),
        }
    }
}
