//! Refresh store trait defining the interface for the per-subject refresh record.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::entities::Subject;
use crate::errors::DomainError;

/// Namespace of refresh records in the key-value store
pub const REFRESH_KEY_PREFIX: &str = "refresh";

/// Canonical store key for a subject's refresh record: `refresh:<subject>`
pub fn refresh_key(subject: &Subject) -> String {
    format!("{}:{}", REFRESH_KEY_PREFIX, subject.as_str())
}

/// Store holding the one currently valid refresh credential per subject
///
/// Only the digest of a refresh token is ever handed to the store. Exactly
/// the most recently written value is valid for a subject; no history is kept.
///
/// # Concurrency
/// Concurrent calls for the same subject are allowed. `put` must be a single
/// atomic overwrite; implementations must not rely on compare-and-swap.
#[async_trait]
pub trait RefreshStore: Send + Sync {
    /// Overwrite the subject's record with `token_digest`, expiring after `ttl`
    ///
    /// # Returns
    /// * `Ok(())` - Record written
    /// * `Err(DomainError::StoreUnavailable)` - Store could not be reached
    async fn put(&self, subject: &Subject, token_digest: &str, ttl: Duration) -> Result<(), DomainError>;

    /// Fetch the digest currently stored for the subject
    ///
    /// # Returns
    /// * `Ok(Some(digest))` - A live record exists
    /// * `Ok(None)` - No record, or it has expired
    /// * `Err(DomainError)` - Store error
    async fn get(&self, subject: &Subject) -> Result<Option<String>, DomainError>;

    /// Remove the subject's record
    ///
    /// # Returns
    /// * `Ok(true)` - A record was removed
    /// * `Ok(false)` - Nothing was stored
    /// * `Err(DomainError)` - Store error
    async fn delete(&self, subject: &Subject) -> Result<bool, DomainError>;
}
