//! Credential issuance

use constant_time_eq::constant_time_eq;
use jsonwebtoken::{encode, EncodingKey, Header};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::clock::Clock;
use crate::domain::entities::{Claims, Subject, TokenKind, TokenPair};
use crate::errors::TokenError;

use super::config::TokenServiceConfig;

/// Signs access + refresh token pairs
///
/// Stateless; never touches the refresh store.
pub struct CredentialIssuer {
    config: TokenServiceConfig,
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    clock: Arc<dyn Clock>,
}

impl CredentialIssuer {
    pub fn new(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let access_key = EncodingKey::from_secret(config.access_secret.as_bytes());
        let refresh_key = EncodingKey::from_secret(config.refresh_secret.as_bytes());

        Self {
            config,
            access_key,
            refresh_key,
            clock,
        }
    }

    /// Issues a new token pair for `subject`
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Both tokens, issued at the same instant
    /// * `Err(TokenError::GenerationFailed)` - Blank subject or signing failed
    pub fn issue(&self, subject: &Subject) -> Result<TokenPair, TokenError> {
        if subject.is_empty() {
            return Err(TokenError::GenerationFailed);
        }

        let issued_at = self.clock.now();
        let access_claims = Claims::new(
            subject,
            TokenKind::Access,
            issued_at,
            self.config.access_ttl,
            &self.config.issuer,
            &self.config.audience,
        );
        let refresh_claims = Claims::new(
            subject,
            TokenKind::Refresh,
            issued_at,
            self.config.refresh_ttl,
            &self.config.issuer,
            &self.config.audience,
        );

        Ok(TokenPair {
            access_token: self.sign(&access_claims, &self.access_key)?,
            refresh_token: self.sign(&refresh_claims, &self.refresh_key)?,
            issued_at,
            access_expires_in: self.config.access_ttl.num_seconds(),
            refresh_expires_in: self.config.refresh_ttl.num_seconds(),
        })
    }

    /// Configuration the issuer signs with
    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    fn sign(&self, claims: &Claims, key: &EncodingKey) -> Result<String, TokenError> {
        encode(&Header::new(self.config.algorithm), claims, key).map_err(|e| {
            tracing::error!(error = %e, kind = claims.kind.as_str(), "Failed to sign token");
            TokenError::GenerationFailed
        })
    }
}

/// Hex SHA-256 digest of a token, the only form a refresh token is stored in
pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Constant-time digest comparison
pub fn digests_match(stored: &str, presented: &str) -> bool {
    constant_time_eq(stored.as_bytes(), presented.as_bytes())
}
