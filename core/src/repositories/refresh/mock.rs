//! Mock implementation of RefreshStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::{RefreshRecord, Subject};
use crate::errors::DomainError;

use super::r#trait::RefreshStore;

/// Mock refresh store with TTL, failure and latency injection
pub struct MockRefreshStore {
    records: Arc<RwLock<HashMap<Subject, RefreshRecord>>>,
    clock: Arc<dyn Clock>,
    unavailable: AtomicBool,
    read_delay: std::sync::Mutex<Option<Duration>>,
    puts: AtomicUsize,
}

impl MockRefreshStore {
    /// Create a new mock store using wall-clock time
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a mock store that expires records against `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            clock,
            unavailable: AtomicBool::new(false),
            read_delay: std::sync::Mutex::new(None),
            puts: AtomicUsize::new(0),
        }
    }

    /// Make every call fail as if the store were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Delay every `get` response by `delay`
    pub fn set_read_delay(&self, delay: Option<Duration>) {
        *self.read_delay.lock().unwrap() = delay;
    }

    /// Number of successful `put` calls so far
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Raw stored digest, ignoring expiry
    pub async fn stored_digest(&self, subject: &Subject) -> Option<String> {
        self.records.read().await.get(subject).map(|record| record.token_hash.clone())
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable {
                message: "mock store offline".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockRefreshStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RefreshStore for MockRefreshStore {
    async fn put(&self, subject: &Subject, token_digest: &str, ttl: Duration) -> Result<(), DomainError> {
        self.check_available()?;
        let ttl = chrono::Duration::from_std(ttl).map_err(|e| DomainError::Internal {
            message: e.to_string(),
        })?;
        let record = RefreshRecord::new(subject.clone(), token_digest.to_string(), self.clock.now(), ttl);

        self.records.write().await.insert(subject.clone(), record);
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get(&self, subject: &Subject) -> Result<Option<String>, DomainError> {
        self.check_available()?;

        let now = self.clock.now();
        let digest = self
            .records
            .read()
            .await
            .get(subject)
            .filter(|record| !record.is_expired_at(now))
            .map(|record| record.token_hash.clone());

        // Latency is applied after the read so concurrent callers observe the same value
        let delay = *self.read_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(digest)
    }

    async fn delete(&self, subject: &Subject) -> Result<bool, DomainError> {
        self.check_available()?;
        Ok(self.records.write().await.remove(subject).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[tokio::test]
    async fn test_put_overwrites_previous_value() {
        let store = MockRefreshStore::new();
        let subject = Subject::new("u1");

        store.put(&subject, "first", Duration::from_secs(60)).await.unwrap();
        store.put(&subject, "second", Duration::from_secs(60)).await.unwrap();

        assert_eq!(store.get(&subject).await.unwrap().as_deref(), Some("second"));
        assert_eq!(store.put_count(), 2);
    }

    #[tokio::test]
    async fn test_records_expire_with_clock() {
        let clock = Arc::new(ManualClock::starting_now());
        let store = MockRefreshStore::with_clock(clock.clone());
        let subject = Subject::new("u1");

        store.put(&subject, "digest", Duration::from_secs(60)).await.unwrap();
        clock.advance(chrono::Duration::seconds(60));

        assert_eq!(store.get(&subject).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unavailable_store_errors() {
        let store = MockRefreshStore::new();
        store.set_unavailable(true);

        let result = store.get(&Subject::new("u1")).await;
        assert!(matches!(result, Err(DomainError::StoreUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let store = MockRefreshStore::new();
        let subject = Subject::new("u1");

        assert!(!store.delete(&subject).await.unwrap());
        store.put(&subject, "digest", Duration::from_secs(60)).await.unwrap();
        assert!(store.delete(&subject).await.unwrap());
    }
}
