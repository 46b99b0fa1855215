//! Cache module for the Redis-backed refresh store
//!
//! This module provides the refresh-record store over a multiplexed Redis
//! connection, with connection retry and an explicit close.

pub mod redis_store;

#[cfg(test)]
mod tests;

pub use redis_store::{mask_url, RedisRefreshStore};

// Re-export commonly used types
pub use sk_shared::config::CacheConfig;
