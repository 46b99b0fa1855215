//! Mock implementation of IdentityStore for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::entities::{IdentityRecord, Subject};
use crate::errors::DomainError;

use super::r#trait::IdentityStore;

/// Mock identity store for testing
pub struct MockIdentityStore {
    records: Arc<RwLock<HashMap<Subject, IdentityRecord>>>,
    unavailable: AtomicBool,
    delay: std::sync::Mutex<Option<Duration>>,
}

impl MockIdentityStore {
    /// Create a new empty mock store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            unavailable: AtomicBool::new(false),
            delay: std::sync::Mutex::new(None),
        }
    }

    /// Create a store already holding the given subjects
    pub async fn with_subjects(subjects: &[&str]) -> Self {
        let store = Self::new();
        for subject in subjects {
            store.insert(Subject::new(*subject)).await;
        }
        store
    }

    /// Add a subject that never changed credentials
    pub async fn insert(&self, subject: Subject) {
        self.records
            .write()
            .await
            .insert(subject.clone(), IdentityRecord::new(subject));
    }

    /// Remove a subject entirely
    pub async fn remove(&self, subject: &Subject) {
        self.records.write().await.remove(subject);
    }

    /// Make every call fail as if the store were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Delay every call by `delay`
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap() = delay;
    }

    async fn before_call(&self) -> Result<(), DomainError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable {
                message: "mock identity store offline".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityStore for MockIdentityStore {
    async fn find_by_id(&self, subject: &Subject) -> Result<Option<IdentityRecord>, DomainError> {
        self.before_call().await?;
        Ok(self.records.read().await.get(subject).cloned())
    }

    async fn record_credentials_change(&self, subject: &Subject, at: DateTime<Utc>) -> Result<bool, DomainError> {
        self.before_call().await?;
        match self.records.write().await.get_mut(subject) {
            Some(record) => {
                record.credentials_changed_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
