//! Token verification

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::sync::Arc;

use crate::clock::Clock;
use crate::domain::entities::{Claims, TokenKind};
use crate::errors::TokenError;

use super::config::TokenServiceConfig;

/// Verifies signed tokens and classifies failures
///
/// The secret is selected by the expected [`TokenKind`]. Expiry is checked
/// against the injected clock with zero leeway: a token is expired once
/// `now >= exp`.
pub struct TokenVerifier {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenVerifier {
    pub fn new(config: &TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        // Time-based checks run against the injected clock instead
        validation.validate_exp = false;
        validation.validate_nbf = false;

        Self {
            access_key: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            algorithm: config.algorithm,
            validation,
            clock,
        }
    }

    /// Verifies `token` as a credential of `kind`
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Valid and unexpired
    /// * `Err(TokenError::Expired)` - Valid signature, past expiry
    /// * `Err(TokenError::BadSignature)` - Wrong secret or foreign algorithm
    /// * `Err(TokenError::Malformed)` - Anything else
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        let key = match kind {
            TokenKind::Access => &self.access_key,
            TokenKind::Refresh => &self.refresh_key,
        };

        let claims = decode::<Claims>(token, key, &self.validation)
            .map_err(|e| self.classify(token, e))?
            .claims;

        if claims.kind != kind {
            return Err(TokenError::Malformed);
        }
        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn classify(&self, token: &str, error: JwtError) -> TokenError {
        match error.kind() {
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::InvalidKeyFormat => TokenError::BadSignature,
            // Headers naming an algorithm jsonwebtoken cannot even parse, e.g. "none"
            _ if self.names_foreign_algorithm(token) => TokenError::BadSignature,
            _ => TokenError::Malformed,
        }
    }

    fn names_foreign_algorithm(&self, token: &str) -> bool {
        let Some(segment) = token.split('.').next() else {
            return false;
        };
        let Ok(bytes) = URL_SAFE_NO_PAD.decode(segment) else {
            return false;
        };
        let Ok(header) = serde_json::from_slice::<serde_json::Value>(&bytes) else {
            return false;
        };

        match header.get("alg").and_then(|alg| alg.as_str()) {
            Some(alg) => !matches!(alg.parse::<Algorithm>(), Ok(parsed) if parsed == self.algorithm),
            None => false,
        }
    }
}
