//! Credential carriers
//!
//! Access and refresh tokens travel in two HttpOnly cookies. An
//! `Authorization: Bearer` header is also accepted for the access token and
//! takes precedence over the cookie.

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::http::header::AUTHORIZATION;
use actix_web::HttpRequest;

use sk_core::domain::entities::TokenPair;
use sk_core::services::PresentedCredentials;
use sk_shared::config::CookieConfig;

/// Cookies carrying a freshly issued pair, each living as long as its token
pub fn credential_cookies(config: &CookieConfig, pair: &TokenPair) -> [Cookie<'static>; 2] {
    [
        build(config, &config.access_name, pair.access_token.clone(), pair.access_expires_in),
        build(config, &config.refresh_name, pair.refresh_token.clone(), pair.refresh_expires_in),
    ]
}

/// Cookies that clear both carriers on the client
pub fn removal_cookies(config: &CookieConfig) -> [Cookie<'static>; 2] {
    [
        removal(config, &config.access_name),
        removal(config, &config.refresh_name),
    ]
}

/// Read whatever credentials the request carries
pub fn presented_credentials(req: &HttpRequest, config: &CookieConfig) -> PresentedCredentials {
    let access_token = extract_bearer_token(req)
        .or_else(|| req.cookie(&config.access_name).map(|c| c.value().to_string()));
    let refresh_token = req
        .cookie(&config.refresh_name)
        .map(|c| c.value().to_string());

    PresentedCredentials::new(access_token, refresh_token)
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn build(config: &CookieConfig, name: &str, value: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(name.to_string(), value)
        .http_only(true)
        .secure(config.secure)
        .same_site(same_site(&config.same_site))
        .path(config.path.clone())
        .max_age(Duration::seconds(max_age_secs.max(0)))
        .finish()
}

fn removal(config: &CookieConfig, name: &str) -> Cookie<'static> {
    let mut cookie = build(config, name, String::new(), 0);
    cookie.make_removal();
    cookie
}

fn same_site(value: &str) -> SameSite {
    match value.to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}
