use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use sk_core::domain::entities::{IdentityRecord, Subject};
use sk_core::errors::DomainError;
use sk_core::repositories::IdentityStore;

/// Identity store kept in a process-local map
#[derive(Default)]
pub struct InMemoryIdentityStore {
    records: RwLock<HashMap<Subject, IdentityRecord>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subject that has never changed credentials
    pub async fn register(&self, subject: Subject) {
        self.records
            .write()
            .await
            .insert(subject.clone(), IdentityRecord::new(subject));
    }

    /// Delete a subject's account
    pub async fn remove(&self, subject: &Subject) -> bool {
        self.records.write().await.remove(subject).is_some()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn find_by_id(&self, subject: &Subject) -> Result<Option<IdentityRecord>, DomainError> {
        Ok(self.records.read().await.get(subject).cloned())
    }

    async fn record_credentials_change(&self, subject: &Subject, at: DateTime<Utc>) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(subject) else {
            return Ok(false);
        };
        record.credentials_changed_at = Some(at);
        Ok(true)
    }
}
