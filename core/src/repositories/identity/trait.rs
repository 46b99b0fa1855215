//! Identity store trait: the slice of the user account store sessions depend on.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{IdentityRecord, Subject};
use crate::errors::DomainError;

/// Read/write access to subject existence and the credentials-changed timestamp
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Look up a subject
    ///
    /// # Returns
    /// * `Ok(Some(record))` - Subject exists
    /// * `Ok(None)` - Subject no longer exists
    /// * `Err(DomainError)` - Store error
    async fn find_by_id(&self, subject: &Subject) -> Result<Option<IdentityRecord>, DomainError>;

    /// Set the subject's credentials-changed timestamp to `at`
    ///
    /// Returns `Ok(false)` when the subject does not exist.
    async fn record_credentials_change(&self, subject: &Subject, at: DateTime<Utc>) -> Result<bool, DomainError>;
}
