//! Application state shared across HTTP handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, CredentialService, LinkService, TokenService};
use crate::domain::repositories::{AccountRepository, LinkRepository};

/// Shared state injected into every handler.
///
/// Services hold their repositories behind trait objects, so the same state
/// type serves PostgreSQL in production and in-memory stores in tests.
/// Cloning is cheap: every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub credential_service: Arc<CredentialService<dyn AccountRepository>>,
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
}

impl AppState {
    /// Wires services over the given repositories.
    pub fn new(
        account_repository: Arc<dyn AccountRepository>,
        link_repository: Arc<dyn LinkRepository>,
        jwt_secret: &str,
        base_url: &str,
    ) -> Self {
        let credential_service = Arc::new(CredentialService::new(account_repository));
        Self::from_services(
            credential_service,
            Arc::new(TokenService::new(jwt_secret)),
            Arc::new(LinkService::new(link_repository, base_url)),
        )
    }

    /// Builds state from preconstructed services.
    pub fn from_services(
        credential_service: Arc<CredentialService<dyn AccountRepository>>,
        token_service: Arc<TokenService>,
        link_service: Arc<LinkService<dyn LinkRepository>>,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(token_service.clone()));

        Self {
            credential_service,
            token_service,
            auth_service,
            link_service,
        }
    }
}
