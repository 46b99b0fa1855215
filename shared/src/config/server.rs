//! HTTP listener settings

use serde::{Deserialize, Serialize};

use super::{env_parsed, ConfigError};

/// Where the API listens and which browser origin may call it with cookies
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Origin allowed to send credentialed cross-site requests
    #[serde(default)]
    pub frontend_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
            frontend_origin: None,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Load from `SERVER_HOST`, `SERVER_PORT` and `FRONTEND_URL`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: env_parsed("SERVER_PORT", defaults.port)?,
            frontend_origin: std::env::var("FRONTEND_URL")
                .ok()
                .and_then(|url| normalize_origin(&url)),
        })
    }

    pub fn with_frontend_origin(mut self, origin: &str) -> Self {
        self.frontend_origin = normalize_origin(origin);
        self
    }

    /// `host:port` for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Browsers send `Origin` without a trailing slash or path
fn normalize_origin(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
