//! Deployment environment and log level

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the service is running
///
/// Production forces Secure cookies, restricts CORS to the configured
/// frontend and refuses the development signing secrets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Read `ENVIRONMENT` (or `RUST_ENV`); anything unrecognised is development
    pub fn from_env() -> Self {
        ["ENVIRONMENT", "RUST_ENV"]
            .iter()
            .find_map(|key| std::env::var(key).ok())
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment: {}", other)),
        }
    }
}

/// Default `env_logger` filter; `RUST_LOG` still overrides it
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Staging)
    }
}

impl LoggingConfig {
    /// Debug locally, info in staging, warn in production
    pub fn for_environment(env: Environment) -> Self {
        let level = match env {
            Environment::Development => "debug",
            Environment::Staging => "info",
            Environment::Production => "warn",
        };
        Self {
            level: level.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(" Prod ".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("test".parse::<Environment>().unwrap(), Environment::Staging);
        assert_eq!("local".parse::<Environment>().unwrap(), Environment::Development);
        assert!("qa-cluster".parse::<Environment>().is_err());
    }

    #[test]
    fn test_environment_from_env_falls_back() {
        temp_env::with_vars(
            [("ENVIRONMENT", Some("bogus")), ("RUST_ENV", None::<&str>)],
            || assert_eq!(Environment::from_env(), Environment::Development),
        );
        temp_env::with_vars(
            [("ENVIRONMENT", None::<&str>), ("RUST_ENV", Some("production"))],
            || assert_eq!(Environment::from_env(), Environment::Production),
        );
    }

    #[test]
    fn test_log_level_per_environment() {
        assert_eq!(LoggingConfig::for_environment(Environment::Development).level, "debug");
        assert_eq!(LoggingConfig::for_environment(Environment::Production).level, "warn");
        assert_eq!(LoggingConfig::default().level, "info");
    }
}
