//! Shared application state handed to every worker

use std::sync::Arc;

use sk_core::clock::Clock;
use sk_core::repositories::{IdentityStore, RefreshStore};
use sk_core::services::{CredentialIssuer, RevocationManager, SessionService, TokenServiceConfig, TokenVerifier};
use sk_shared::config::{AuthConfig, CookieConfig};

/// Services and cookie settings used by the session middleware and routes
pub struct AppState {
    pub session: Arc<SessionService>,
    pub revocation: Arc<RevocationManager>,
    pub cookies: CookieConfig,
}

impl AppState {
    /// Wire the session services over already-connected stores
    pub fn new(
        auth: &AuthConfig,
        refresh_store: Arc<dyn RefreshStore>,
        identity_store: Arc<dyn IdentityStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let token_config = TokenServiceConfig::from(&auth.jwt);
        let verifier = Arc::new(TokenVerifier::new(&token_config, clock.clone()));
        let issuer = Arc::new(CredentialIssuer::new(token_config, clock.clone()));

        let session = Arc::new(SessionService::new(
            issuer,
            verifier,
            refresh_store.clone(),
            identity_store.clone(),
            auth.store_timeout(),
        ));
        let revocation = Arc::new(RevocationManager::new(
            refresh_store,
            identity_store,
            clock,
            auth.store_timeout(),
        ));

        Self {
            session,
            revocation,
            cookies: auth.cookies.clone(),
        }
    }
}
