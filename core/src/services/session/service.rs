//! Session service: verify-and-maybe-rotate

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{Claims, Subject, TokenKind, TokenPair};
use crate::errors::{AuthError, DomainError};
use crate::repositories::{IdentityStore, RefreshStore};
use crate::services::bounded;
use crate::services::token::{digests_match, token_digest, CredentialIssuer, TokenVerifier};

/// Credentials a request carried, already extracted from its transport
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentedCredentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl PresentedCredentials {
    pub fn new(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: non_empty(access_token),
            refresh_token: non_empty(refresh_token),
        }
    }
}

/// Result of a successful authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Verified subject
    pub subject: Subject,

    /// New credentials when the session was rotated; the caller must transmit them
    pub rotated: Option<TokenPair>,
}

/// Per-request session state machine
///
/// | presented access token     | result                                   |
/// |----------------------------|------------------------------------------|
/// | valid, subject current     | authenticated                            |
/// | expired                    | refresh attempt, or `InvalidOrExpiredRefresh` |
/// | absent                     | `MissingCredential`                      |
/// | malformed / bad signature  | `MalformedToken`                         |
/// | issued before a credential change, or subject gone | `RevokedSession` |
pub struct SessionService {
    issuer: Arc<CredentialIssuer>,
    verifier: Arc<TokenVerifier>,
    refresh_store: Arc<dyn RefreshStore>,
    identity_store: Arc<dyn IdentityStore>,
    store_timeout: Duration,
}

impl SessionService {
    pub fn new(
        issuer: Arc<CredentialIssuer>,
        verifier: Arc<TokenVerifier>,
        refresh_store: Arc<dyn RefreshStore>,
        identity_store: Arc<dyn IdentityStore>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            issuer,
            verifier,
            refresh_store,
            identity_store,
            store_timeout,
        }
    }

    /// Authenticate a request, rotating the session if the access token expired
    ///
    /// # Returns
    ///
    /// * `Ok(SessionOutcome)` - Authenticated; `rotated` holds new credentials if any
    /// * `Err(AuthError)` - Rejected; never fails open on store errors
    pub async fn authenticate(&self, presented: PresentedCredentials) -> Result<SessionOutcome, AuthError> {
        let PresentedCredentials {
            access_token,
            refresh_token,
        } = presented;

        let Some(access_token) = access_token else {
            return Err(AuthError::MissingCredential);
        };

        match self.verifier.verify(&access_token, TokenKind::Access) {
            Ok(claims) => {
                let subject = self.ensure_current(&claims).await?;
                Ok(SessionOutcome {
                    subject,
                    rotated: None,
                })
            }
            Err(e) if e.is_recoverable() => {
                tracing::debug!("Access token expired, attempting refresh");
                match refresh_token {
                    Some(refresh_token) => self.refresh_into_outcome(&refresh_token).await,
                    None => {
                        tracing::warn!("Access token expired and no refresh token presented");
                        Err(AuthError::InvalidOrExpiredRefresh)
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected access token");
                Err(AuthError::MalformedToken)
            }
        }
    }

    /// Exchange a refresh token for a new pair, overwriting the stored record
    ///
    /// The presented token must verify and match the digest currently stored
    /// for its subject. Two concurrent calls with the same token may both
    /// succeed; the last write wins and the other pair fails its next refresh.
    pub async fn rotate(&self, refresh_token: &str) -> Result<(Subject, TokenPair), AuthError> {
        let claims = self
            .verifier
            .verify(refresh_token, TokenKind::Refresh)
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected refresh token");
                AuthError::InvalidOrExpiredRefresh
            })?;
        let subject = claims.subject();

        let stored = self
            .store_call("refresh_store.get", self.refresh_store.get(&subject))
            .await?;
        let presented = token_digest(refresh_token);
        match stored {
            Some(stored) if digests_match(&stored, &presented) => {}
            Some(_) => {
                tracing::warn!(subject = %subject, "Refresh token is not the current one");
                return Err(AuthError::InvalidOrExpiredRefresh);
            }
            None => {
                tracing::warn!(subject = %subject, "No refresh record for subject");
                return Err(AuthError::InvalidOrExpiredRefresh);
            }
        }

        self.ensure_current(&claims).await?;

        let pair = self.establish(&subject).await?;
        tracing::info!(subject = %subject, "Session rotated");
        Ok((subject, pair))
    }

    /// Issue a fresh pair for `subject` and make its refresh token the current one
    ///
    /// Used after login, registration, email verification and password reset.
    pub async fn establish(&self, subject: &Subject) -> Result<TokenPair, AuthError> {
        let pair = self.issuer.issue(subject).map_err(|e| {
            tracing::error!(subject = %subject, error = %e, "Failed to issue credentials");
            AuthError::IssuanceFailed
        })?;

        let ttl = self.issuer.config().refresh_store_ttl();
        self.store_call(
            "refresh_store.put",
            self.refresh_store.put(subject, &token_digest(&pair.refresh_token), ttl),
        )
        .await?;

        Ok(pair)
    }

    async fn refresh_into_outcome(&self, refresh_token: &str) -> Result<SessionOutcome, AuthError> {
        let (subject, pair) = self.rotate(refresh_token).await?;
        Ok(SessionOutcome {
            subject,
            rotated: Some(pair),
        })
    }

    /// Subject must still exist and not have changed credentials after issuance
    async fn ensure_current(&self, claims: &Claims) -> Result<Subject, AuthError> {
        let subject = claims.subject();
        let record = self
            .store_call("identity_store.find_by_id", self.identity_store.find_by_id(&subject))
            .await?;

        match record {
            None => {
                tracing::warn!(subject = %subject, "Subject no longer exists");
                Err(AuthError::RevokedSession)
            }
            Some(record) if record.credentials_changed_after(claims.iat) => {
                tracing::warn!(subject = %subject, "Token predates credential change");
                Err(AuthError::RevokedSession)
            }
            Some(_) => Ok(subject),
        }
    }

    async fn store_call<T, F>(&self, operation: &'static str, call: F) -> Result<T, AuthError>
    where
        F: std::future::Future<Output = Result<T, DomainError>>,
    {
        bounded::within(self.store_timeout, operation, call)
            .await
            .map_err(|e| {
                tracing::error!(operation, error = %e, "Session store unavailable");
                AuthError::StoreUnavailable
            })
    }
}

fn non_empty(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.trim().is_empty())
}
