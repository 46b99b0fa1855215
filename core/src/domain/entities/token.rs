//! Token entities for JWT-based sessions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::subject::Subject;

/// Which of the two credentials a token is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential authorizing individual requests
    Access,
    /// Long-lived credential exchangeable for a new pair
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Access or refresh
    pub kind: TokenKind,
}

impl Claims {
    /// Creates claims for a token issued at `issued_at` living for `ttl`
    pub fn new(
        subject: &Subject,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        ttl: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let expiry = issued_at + ttl;

        Self {
            sub: subject.as_str().to_string(),
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
            nbf: issued_at.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
            kind,
        }
    }

    /// Checks if the claims have expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Gets the subject from the claims
    pub fn subject(&self) -> Subject {
        Subject::new(self.sub.clone())
    }
}

/// A freshly issued access + refresh credential pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// When both tokens were issued
    pub issued_at: DateTime<Utc>,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

/// The refresh credential currently valid for a subject
///
/// Only the SHA-256 digest of the token is kept; one record per subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshRecord {
    /// Subject this record belongs to
    pub subject: Subject,

    /// Hex SHA-256 digest of the refresh token
    pub token_hash: String,

    /// Timestamp when the record expires
    pub expires_at: DateTime<Utc>,
}

impl RefreshRecord {
    /// Creates a record expiring `ttl` after `now`
    pub fn new(subject: Subject, token_hash: String, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            subject,
            token_hash,
            expires_at: now + ttl,
        }
    }

    /// Checks if the record has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_claims() {
        let subject = Subject::new("u1");
        let now = Utc::now();
        let claims = Claims::new(&subject, TokenKind::Access, now, Duration::minutes(15), "iss", "aud");

        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 900);
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.subject(), subject);
        assert!(!claims.is_expired_at(now));
        assert!(claims.is_expired_at(now + Duration::minutes(15)));
    }

    #[test]
    fn test_each_token_gets_unique_jti() {
        let now = Utc::now();
        let subject = Subject::new("u1");
        let a = Claims::new(&subject, TokenKind::Access, now, Duration::minutes(1), "iss", "aud");
        let b = Claims::new(&subject, TokenKind::Access, now, Duration::minutes(1), "iss", "aud");
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_token_kind_serialization() {
        assert_eq!(serde_json::to_string(&TokenKind::Refresh).unwrap(), "\"refresh\"");
        assert_eq!(TokenKind::Access.as_str(), "access");
    }

    #[test]
    fn test_refresh_record_expiry() {
        let now = Utc::now();
        let record = RefreshRecord::new(Subject::new("u1"), "hash".to_string(), now, Duration::days(7));

        assert!(!record.is_expired_at(now));
        assert!(record.is_expired_at(now + Duration::days(7)));
    }
}
