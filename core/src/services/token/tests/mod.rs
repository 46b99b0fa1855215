
use chrono::Duration;
use std::sync::Arc;

use crate::clock::ManualClock;
use crate::services::token::{CredentialIssuer, TokenServiceConfig, TokenVerifier};

pub(super) const ACCESS_SECRET: &str = "test-access-secret";
pub(super) const REFRESH_SECRET: &str = "test-refresh-secret";

pub(super) fn test_config() -> TokenServiceConfig {
    TokenServiceConfig::new(ACCESS_SECRET, REFRESH_SECRET, Duration::minutes(15), Duration::days(7))
}

pub(super) fn fixture() -> (Arc<ManualClock>, CredentialIssuer, TokenVerifier) {
    let clock = Arc::new(ManualClock::starting_now());
    let config = test_config();
    let issuer = CredentialIssuer::new(config.clone(), clock.clone());
    let verifier = TokenVerifier::new(&config, clock.clone());
    (clock, issuer, verifier)
}
