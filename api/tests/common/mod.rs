//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::web;
use std::collections::HashMap;
use std::sync::Arc;

use sk_api::middleware::cors::create_cors;
use sk_api::state::AppState;
use sk_core::clock::ManualClock;
use sk_core::domain::entities::{Subject, TokenPair};
use sk_infra::memory::{InMemoryIdentityStore, InMemoryRefreshStore};
use sk_shared::config::{AuthConfig, Environment, JwtConfig, ServerConfig};

pub const ACCESS_SECRET: &str = "test-access-secret";
pub const REFRESH_SECRET: &str = "test-refresh-secret";

pub struct TestContext {
    pub clock: Arc<ManualClock>,
    pub refresh_store: Arc<InMemoryRefreshStore>,
    pub identity_store: Arc<InMemoryIdentityStore>,
    pub state: web::Data<AppState>,
}

impl TestContext {
    pub async fn new() -> Self {
        let clock = Arc::new(ManualClock::starting_now());
        let refresh_store = Arc::new(InMemoryRefreshStore::new(clock.clone()));
        let identity_store = Arc::new(InMemoryIdentityStore::new());
        identity_store.register(Subject::new("u1")).await;
        identity_store.register(Subject::new("u2")).await;

        let auth = AuthConfig {
            jwt: JwtConfig::new(ACCESS_SECRET, REFRESH_SECRET),
            ..Default::default()
        };
        let state = web::Data::new(AppState::new(
            &auth,
            refresh_store.clone(),
            identity_store.clone(),
            clock.clone(),
        ));

        Self {
            clock,
            refresh_store,
            identity_store,
            state,
        }
    }

    /// Log `subject` in the way an account flow would
    pub async fn login(&self, subject: &str) -> TokenPair {
        self.state
            .session
            .establish(&Subject::new(subject))
            .await
            .expect("establish session")
    }
}

pub fn cors() -> Cors {
    create_cors(&ServerConfig::default(), Environment::Development)
}

pub fn access_cookie(token: &str) -> Cookie<'static> {
    Cookie::new("accessToken", token.to_string())
}

pub fn refresh_cookie(token: &str) -> Cookie<'static> {
    Cookie::new("refreshToken", token.to_string())
}

/// Cookies the response sets, keyed by name
pub fn set_cookies<B>(resp: &ServiceResponse<B>) -> HashMap<String, Cookie<'static>> {
    resp.response()
        .cookies()
        .map(|cookie| (cookie.name().to_string(), cookie.into_owned()))
        .collect()
}

/// Whether both carriers are being cleared
pub fn clears_both<B>(resp: &ServiceResponse<B>) -> bool {
    let cookies = set_cookies(resp);
    ["accessToken", "refreshToken"].iter().all(|name| {
        cookies
            .get(*name)
            .is_some_and(|c| c.value().is_empty() && c.max_age() == Some(actix_web::cookie::time::Duration::ZERO))
    })
}

pub fn not_authenticated_body() -> serde_json::Value {
    serde_json::json!({"error": "not_authenticated", "message": "Not authenticated"})
}
