use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use sk_core::clock::Clock;
use sk_core::domain::entities::{RefreshRecord, Subject};
use sk_core::errors::DomainError;
use sk_core::repositories::RefreshStore;

/// Refresh store kept in a process-local map
pub struct InMemoryRefreshStore {
    records: RwLock<HashMap<Subject, RefreshRecord>>,
    clock: Arc<dyn Clock>,
    unavailable: AtomicBool,
}

impl InMemoryRefreshStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            clock,
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every call fail as if the backing store were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable {
                message: "in-memory refresh store marked unavailable".to_string(),
            });
        }
        Ok(())
    }

    /// Number of live records
    pub async fn len(&self) -> usize {
        let now = self.clock.now();
        self.records
            .read()
            .await
            .values()
            .filter(|record| !record.is_expired_at(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RefreshStore for InMemoryRefreshStore {
    async fn put(&self, subject: &Subject, token_digest: &str, ttl: Duration) -> Result<(), DomainError> {
        self.ensure_available()?;
        let ttl = chrono::Duration::from_std(ttl).map_err(|e| DomainError::Validation {
            message: format!("refresh TTL out of range: {}", e),
        })?;
        let record = RefreshRecord::new(subject.clone(), token_digest.to_string(), self.clock.now(), ttl);

        let mut records = self.records.write().await;
        let now = self.clock.now();
        records.retain(|_, existing| !existing.is_expired_at(now));
        records.insert(subject.clone(), record);
        Ok(())
    }

    async fn get(&self, subject: &Subject) -> Result<Option<String>, DomainError> {
        self.ensure_available()?;
        let now = self.clock.now();
        Ok(self
            .records
            .read()
            .await
            .get(subject)
            .filter(|record| !record.is_expired_at(now))
            .map(|record| record.token_hash.clone()))
    }

    async fn delete(&self, subject: &Subject) -> Result<bool, DomainError> {
        self.ensure_available()?;
        let now = self.clock.now();
        let removed = self.records.write().await.remove(subject);
        Ok(removed.is_some_and(|record| !record.is_expired_at(now)))
    }
}
