//! # Infrastructure Layer
//!
//! Concrete stores behind the session core's repository traits.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis-backed refresh store
//! - **Database**: MySQL identity store using SQLx
//! - **Memory**: in-process stores for development and tests
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis refresh store (default)

use sk_core::errors::DomainError;

/// Cache module - Redis refresh store
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Memory module - in-process stores
pub mod memory;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The store was closed
    #[error("Store connection closed")]
    Closed,
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Config(message) => DomainError::Internal { message },
            other => DomainError::StoreUnavailable {
                message: other.to_string(),
            },
        }
    }
}
