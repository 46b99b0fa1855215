//! Time-bounded store calls.

use std::future::Future;
use std::time::Duration;

use crate::errors::DomainError;

/// Run a store call, failing with `StoreUnavailable` once `limit` elapses
///
/// Errors returned by the call itself are passed through untouched.
pub(crate) async fn within<T, F>(limit: Duration, operation: &'static str, call: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!(operation, timeout_ms = limit.as_millis() as u64, "Store call timed out");
            Err(DomainError::StoreUnavailable {
                message: format!("{} timed out", operation),
            })
        }
    }
}
