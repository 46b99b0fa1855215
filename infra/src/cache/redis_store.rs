//! Redis refresh store implementation
//!
//! One key per subject, `refresh:<subject>` (behind an optional deployment
//! prefix), holding the digest of the current refresh token. Writes are a
//! single `SET key value EX ttl`, so rotation is an atomic overwrite.

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use sk_core::domain::entities::Subject;
use sk_core::errors::DomainError;
use sk_core::repositories::{refresh_key, RefreshStore};
use sk_shared::config::CacheConfig;

use crate::InfrastructureError;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Refresh store backed by a multiplexed Redis connection
///
/// Constructed explicitly with [`RedisRefreshStore::connect`] and shut down
/// with [`RedisRefreshStore::close`]; calls after `close` fail with
/// `StoreUnavailable`.
pub struct RedisRefreshStore {
    connection: RwLock<Option<MultiplexedConnection>>,
    key_prefix: Option<String>,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl RedisRefreshStore {
    /// Connect to Redis, retrying with exponential backoff
    ///
    /// # Returns
    /// * `Err(InfrastructureError::Config)` - The URL could not be parsed
    /// * `Err(InfrastructureError::Cache)` - Every connection attempt failed
    pub async fn connect(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Connecting refresh store to Redis");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::connect_with_retry(
            &client,
            config.max_retries.max(1),
            config.retry_delay_ms,
            Duration::from_secs(config.connection_timeout),
        )
        .await?;

        info!("Refresh store connected");

        Ok(Self {
            connection: RwLock::new(Some(connection)),
            key_prefix: config.key_prefix.clone(),
            max_retries: config.max_retries.max(1),
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    async fn connect_with_retry(
        client: &Client,
        max_retries: u32,
        retry_delay_ms: u64,
        attempt_timeout: Duration,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let result = match tokio::time::timeout(attempt_timeout, client.get_multiplexed_async_connection()).await {
                Ok(result) => result,
                Err(_) => Err(RedisError::from(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "connection attempt timed out",
                ))),
            };

            match result {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Drop the connection; later calls fail with `StoreUnavailable`
    pub async fn close(&self) {
        if self.connection.write().await.take().is_some() {
            info!("Refresh store connection closed");
        }
    }

    /// Full Redis key for a subject's refresh record
    pub fn key_for(&self, subject: &Subject) -> String {
        prefixed_key(self.key_prefix.as_deref(), subject)
    }

    /// Check connectivity with `PING`
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await?;
        Ok(response == "PONG")
    }

    async fn current_connection(&self) -> Result<MultiplexedConnection, InfrastructureError> {
        self.connection
            .read()
            .await
            .clone()
            .ok_or(InfrastructureError::Closed)
    }

    /// Run a command, retrying transient failures with exponential backoff
    async fn execute_with_retry<F, T>(&self, operation: F) -> Result<T, InfrastructureError>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.current_connection().await?;

            match operation(conn).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Redis operation failed after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }
}

#[async_trait]
impl RefreshStore for RedisRefreshStore {
    async fn put(&self, subject: &Subject, token_digest: &str, ttl: Duration) -> Result<(), DomainError> {
        let key = self.key_for(subject);
        let seconds = ttl.as_secs().max(1);
        debug!(subject = %subject, ttl_secs = seconds, "Writing refresh record");

        self.execute_with_retry(|mut conn| {
            let key = key.clone();
            let value = token_digest.to_string();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, seconds).await })
        })
        .await
        .map_err(DomainError::from)
    }

    async fn get(&self, subject: &Subject) -> Result<Option<String>, DomainError> {
        let key = self.key_for(subject);

        self.execute_with_retry(|mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
        .map_err(DomainError::from)
    }

    async fn delete(&self, subject: &Subject) -> Result<bool, DomainError> {
        let key = self.key_for(subject);

        let deleted = self
            .execute_with_retry(|mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await?;

        debug!(subject = %subject, deleted, "Deleted refresh record");
        Ok(deleted > 0)
    }
}

pub(crate) fn prefixed_key(prefix: Option<&str>, subject: &Subject) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, refresh_key(subject)),
        None => refresh_key(subject),
    }
}

/// Check if a Redis error is transient
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Hide credentials in a Redis URL before logging it
pub fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.rfind('@'), url.find("://")) {
        if at_pos > proto_end {
            return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
        }
    }
    url.to_string()
}
