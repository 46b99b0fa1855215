//! Shared utilities and common types for the SessionKeeper server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Credential lifetime (TTL) parsing
//! - The error response body returned to API clients

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, ConfigError, CookieConfig, DatabaseConfig, Environment,
    JwtConfig, LoggingConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
