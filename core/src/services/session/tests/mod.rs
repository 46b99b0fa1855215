
use chrono::Duration;
use std::sync::Arc;

use crate::clock::ManualClock;
use crate::repositories::{MockIdentityStore, MockRefreshStore};
use crate::services::session::SessionService;
use crate::services::token::{CredentialIssuer, TokenServiceConfig, TokenVerifier};

/// Everything a session test needs, sharing one manual clock
pub(super) struct Harness {
    pub clock: Arc<ManualClock>,
    pub refresh_store: Arc<MockRefreshStore>,
    pub identity_store: Arc<MockIdentityStore>,
    pub service: SessionService,
}

pub(super) async fn harness() -> Harness {
    harness_with_timeout(std::time::Duration::from_secs(2)).await
}

pub(super) async fn harness_with_timeout(store_timeout: std::time::Duration) -> Harness {
    let clock = Arc::new(ManualClock::starting_now());
    let config = TokenServiceConfig::new(
        "session-access-secret",
        "session-refresh-secret",
        Duration::minutes(15),
        Duration::days(7),
    );
    let refresh_store = Arc::new(MockRefreshStore::with_clock(clock.clone()));
    let identity_store = Arc::new(MockIdentityStore::with_subjects(&["u1", "u2"]).await);

    let service = SessionService::new(
        Arc::new(CredentialIssuer::new(config.clone(), clock.clone())),
        Arc::new(TokenVerifier::new(&config, clock.clone())),
        refresh_store.clone(),
        identity_store.clone(),
        store_timeout,
    );

    Harness {
        clock,
        refresh_store,
        identity_store,
        service,
    }
}
