//! Configuration for credential issuance and verification

use chrono::Duration;
use jsonwebtoken::Algorithm;
use sk_shared::JwtConfig;

/// Configuration shared by the issuer and the verifier
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret signing access tokens
    pub access_secret: String,
    /// Secret signing refresh tokens
    pub refresh_secret: String,
    /// The only accepted signing algorithm
    pub algorithm: Algorithm,
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
    /// `iss` claim
    pub issuer: String,
    /// `aud` claim
    pub audience: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            access_secret: jwt.access_secret.clone(),
            refresh_secret: jwt.refresh_secret.clone(),
            algorithm: Algorithm::HS256,
            access_ttl: to_chrono(jwt.access_ttl),
            refresh_ttl: to_chrono(jwt.refresh_ttl),
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
        }
    }
}

impl TokenServiceConfig {
    /// Test-friendly constructor with explicit secrets and lifetimes
    pub fn new(
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl,
            refresh_ttl,
            ..Default::default()
        }
    }

    /// Refresh lifetime as a store TTL
    pub fn refresh_store_ttl(&self) -> std::time::Duration {
        self.refresh_ttl.to_std().unwrap_or_default()
    }
}

// Lifetimes are validated at startup; anything beyond chrono's range is clamped.
fn to_chrono(ttl: std::time::Duration) -> Duration {
    Duration::from_std(ttl).unwrap_or_else(|_| Duration::days(365_000))
}
