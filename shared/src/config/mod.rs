//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Credential signing, lifetimes, cookies and store timeouts
//! - `cache` - Redis configuration for the refresh-record store
//! - `database` - Identity store connection configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration
//! - `ttl` - Lifetime strings such as `15m` or `7d`

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod server;
pub mod ttl;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthConfig, CookieConfig, JwtConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use server::ServerConfig;
pub use ttl::parse_ttl;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid lifetime '{value}': {reason}")]
    InvalidTtl { value: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Parse an environment variable, keeping `default` when it is unset
///
/// A value that is present but does not parse is an error, so a typo fails
/// startup instead of silently running with the default.
pub(crate) fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("{}: {}", key, value))),
        Err(_) => Ok(default),
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Identity store database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Refresh store configuration
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    ///
    /// Production refuses to start with the development signing secrets.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let auth = AuthConfig::from_env(environment)?;

        if environment.is_production() && auth.jwt.is_using_default_secret() {
            return Err(ConfigError::Invalid(
                "JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must be set in production".to_string(),
            ));
        }

        Ok(Self {
            environment,
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth,
            cache: CacheConfig::from_env()?,
            logging: LoggingConfig::for_environment(environment),
        })
    }
}
