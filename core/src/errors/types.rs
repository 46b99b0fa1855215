//! Error types for credential verification and request authentication
//!
//! `TokenError` classifies why a single token failed verification.
//! `AuthError` is the outcome of authenticating a whole request; its variants
//! are kept for server-side diagnostics only and are never shown to clients.

use thiserror::Error;

/// Token verification and issuance failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Not a well-formed token, or claims that do not belong to this service
    #[error("Malformed token")]
    Malformed,

    /// Signature does not verify, or an unexpected algorithm was used
    #[error("Token signature verification failed")]
    BadSignature,

    /// Cryptographically valid but past its expiry
    #[error("Token expired")]
    Expired,

    /// Signing a new token failed
    #[error("Token generation failed")]
    GenerationFailed,
}

impl TokenError {
    /// Only expiry can be recovered from (by refreshing)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TokenError::Expired)
    }
}

/// Request authentication failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("No credential presented")]
    MissingCredential,

    #[error("Access token is malformed or has a bad signature")]
    MalformedToken,

    /// Triggers a refresh attempt; never returned to the transport
    #[error("Access token expired")]
    ExpiredAccess,

    #[error("Refresh token is invalid, expired or no longer current")]
    InvalidOrExpiredRefresh,

    #[error("Session was revoked")]
    RevokedSession,

    #[error("Session store unavailable")]
    StoreUnavailable,

    #[error("Credential issuance failed")]
    IssuanceFailed,
}

impl AuthError {
    /// Short machine-readable reason for logs
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::MalformedToken => "malformed_token",
            AuthError::ExpiredAccess => "expired_access",
            AuthError::InvalidOrExpiredRefresh => "invalid_or_expired_refresh",
            AuthError::RevokedSession => "revoked_session",
            AuthError::StoreUnavailable => "store_unavailable",
            AuthError::IssuanceFailed => "issuance_failed",
        }
    }

    /// Whether the client's credential carriers should be cleared
    ///
    /// A store outage rejects the request but keeps the carriers, so the
    /// session can resume once the store is reachable again.
    pub fn clears_credentials(&self) -> bool {
        matches!(
            self,
            AuthError::MalformedToken | AuthError::InvalidOrExpiredRefresh | AuthError::RevokedSession
        )
    }

    /// HTTP status the transport layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::IssuanceFailed => 500,
            _ => 401,
        }
    }
}
