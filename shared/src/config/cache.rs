//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::{env_parsed, ConfigError};

/// Redis configuration for the refresh-record store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Connection attempts before giving up at startup
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between connection attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Optional deployment prefix placed in front of every key
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Load from `REDIS_URL`, `REDIS_KEY_PREFIX`, `REDIS_CONNECT_TIMEOUT`
    /// and `REDIS_MAX_RETRIES`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            connection_timeout: env_parsed("REDIS_CONNECT_TIMEOUT", defaults.connection_timeout)?,
            max_retries: env_parsed("REDIS_MAX_RETRIES", defaults.max_retries)?,
            retry_delay_ms: defaults.retry_delay_ms,
            key_prefix: std::env::var("REDIS_KEY_PREFIX").ok().filter(|p| !p.is_empty()),
        })
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set a key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}
