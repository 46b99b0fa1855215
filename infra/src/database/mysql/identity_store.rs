//! MySQL implementation of the IdentityStore trait.
//!
//! Reads subject existence and `password_changed_at` from the `users` table
//! that the account-management side of the application owns.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use sk_core::domain::entities::{IdentityRecord, Subject};
use sk_core::errors::DomainError;
use sk_core::repositories::IdentityStore;

/// MySQL implementation of IdentityStore
pub struct MySqlIdentityStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlIdentityStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<IdentityRecord, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| store_error("Failed to get id", e))?;
        let credentials_changed_at: Option<DateTime<Utc>> = row
            .try_get("password_changed_at")
            .map_err(|e| store_error("Failed to get password_changed_at", e))?;

        Ok(IdentityRecord {
            subject: Subject::new(id),
            credentials_changed_at,
        })
    }
}

#[async_trait]
impl IdentityStore for MySqlIdentityStore {
    async fn find_by_id(&self, subject: &Subject) -> Result<Option<IdentityRecord>, DomainError> {
        let query = r#"
            SELECT id, password_changed_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(subject.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Database query failed", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn record_credentials_change(&self, subject: &Subject, at: DateTime<Utc>) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE users
            SET password_changed_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(at)
            .bind(subject.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Database update failed", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn store_error(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(error = %error, "{}", context);
    DomainError::StoreUnavailable {
        message: format!("{}: {}", context, error),
    }
}
