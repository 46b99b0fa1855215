//! Session revocation
//!
//! Logout removes the subject's refresh record. A credential change also
//! stamps the identity store so that every access token issued before it
//! stops verifying, even though it is still cryptographically valid.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

use crate::clock::Clock;
use crate::domain::entities::Subject;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{IdentityStore, RefreshStore};
use crate::services::bounded;

/// Invalidates sessions on logout and password change
pub struct RevocationManager {
    refresh_store: Arc<dyn RefreshStore>,
    identity_store: Arc<dyn IdentityStore>,
    clock: Arc<dyn Clock>,
    store_timeout: Duration,
}

impl RevocationManager {
    pub fn new(
        refresh_store: Arc<dyn RefreshStore>,
        identity_store: Arc<dyn IdentityStore>,
        clock: Arc<dyn Clock>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            refresh_store,
            identity_store,
            clock,
            store_timeout,
        }
    }

    /// End the subject's session
    ///
    /// The caller is responsible for clearing the client's carriers.
    /// Returns whether a refresh record existed.
    pub async fn logout(&self, subject: &Subject) -> DomainResult<bool> {
        let removed = bounded::within(
            self.store_timeout,
            "refresh_store.delete",
            self.refresh_store.delete(subject),
        )
        .await?;

        tracing::info!(subject = %subject, removed, "Session logged out");
        Ok(removed)
    }

    /// Revoke every credential issued to the subject before now
    ///
    /// The timestamp is written before the refresh record is deleted, so a
    /// failed delete still leaves the old refresh token unusable.
    ///
    /// The stamp is truncated to whole seconds, the resolution of `iat`. A
    /// store that rounds fractional seconds up would otherwise reject a
    /// session established in the same second as the change.
    pub async fn on_credential_change(&self, subject: &Subject) -> DomainResult<DateTime<Utc>> {
        let changed_at = whole_seconds(self.clock.now());

        let found = bounded::within(
            self.store_timeout,
            "identity_store.record_credentials_change",
            self.identity_store.record_credentials_change(subject, changed_at),
        )
        .await?;
        if !found {
            return Err(DomainError::NotFound {
                resource: format!("subject {}", subject),
            });
        }

        bounded::within(
            self.store_timeout,
            "refresh_store.delete",
            self.refresh_store.delete(subject),
        )
        .await?;

        tracing::info!(subject = %subject, changed_at = %changed_at, "Credentials changed, sessions revoked");
        Ok(changed_at)
    }
}

fn whole_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(at.timestamp(), 0).unwrap_or(at)
}
