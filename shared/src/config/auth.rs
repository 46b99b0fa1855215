//! Authentication and session configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::environment::Environment;
use super::ttl::parse_ttl;
use super::{env_parsed, ConfigError};

const DEFAULT_ACCESS_SECRET: &str = "development-access-secret-change-in-production";
const DEFAULT_REFRESH_SECRET: &str = "development-refresh-secret-change-in-production";

/// JWT signing configuration
///
/// Access and refresh credentials are signed with separate secrets so that a
/// token minted for one purpose can never verify as the other.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret used to sign access tokens
    pub access_secret: String,

    /// Secret used to sign refresh tokens
    pub refresh_secret: String,

    /// Access token lifetime
    #[serde(with = "duration_secs")]
    pub access_ttl: Duration,

    /// Refresh token lifetime
    #[serde(with = "duration_secs")]
    pub refresh_ttl: Duration,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,

    /// Algorithm for JWT signing (only HS256 is accepted)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from(DEFAULT_ACCESS_SECRET),
            refresh_secret: String::from(DEFAULT_REFRESH_SECRET),
            access_ttl: Duration::from_secs(15 * 60),
            refresh_ttl: Duration::from_secs(7 * 86_400),
            issuer: String::from("session-keeper"),
            audience: String::from("session-keeper-api"),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a JWT configuration with explicit secrets
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Set the access token lifetime
    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    /// Set the refresh token lifetime
    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    /// Load from `JWT_ACCESS_SECRET`, `JWT_REFRESH_SECRET`,
    /// `JWT_ACCESS_EXPIRE` and `JWT_REFRESH_EXPIRE`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let access_ttl = match std::env::var("JWT_ACCESS_EXPIRE") {
            Ok(value) => parse_ttl(&value)?,
            Err(_) => defaults.access_ttl,
        };
        let refresh_ttl = match std::env::var("JWT_REFRESH_EXPIRE") {
            Ok(value) => parse_ttl(&value)?,
            Err(_) => defaults.refresh_ttl,
        };

        Ok(Self {
            access_secret: std::env::var("JWT_ACCESS_SECRET").unwrap_or(defaults.access_secret),
            refresh_secret: std::env::var("JWT_REFRESH_SECRET").unwrap_or(defaults.refresh_secret),
            access_ttl,
            refresh_ttl,
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or(defaults.audience),
            algorithm: defaults.algorithm,
        })
    }

    /// Check if either development secret is still in use
    pub fn is_using_default_secret(&self) -> bool {
        self.access_secret == DEFAULT_ACCESS_SECRET || self.refresh_secret == DEFAULT_REFRESH_SECRET
    }

    /// Reject configurations that would weaken the credential model
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_secret.is_empty() || self.refresh_secret.is_empty() {
            return Err(ConfigError::Invalid("JWT secrets must not be empty".to_string()));
        }
        if self.access_secret == self.refresh_secret {
            return Err(ConfigError::Invalid(
                "access and refresh tokens must use distinct secrets".to_string(),
            ));
        }
        if self.access_ttl >= self.refresh_ttl {
            return Err(ConfigError::Invalid(
                "access token lifetime must be shorter than refresh token lifetime".to_string(),
            ));
        }
        if !self.algorithm.eq_ignore_ascii_case("HS256") {
            return Err(ConfigError::Invalid(format!(
                "unsupported JWT algorithm: {}",
                self.algorithm
            )));
        }
        Ok(())
    }
}

/// Credential cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie carrying the access token
    pub access_name: String,

    /// Cookie carrying the refresh token
    pub refresh_name: String,

    /// Secure flag (HTTPS only)
    pub secure: bool,

    /// SameSite attribute
    pub same_site: String,

    /// Cookie path
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_name: String::from("accessToken"),
            refresh_name: String::from("refreshToken"),
            secure: false,
            same_site: String::from("Lax"),
            path: String::from("/"),
        }
    }
}

impl CookieConfig {
    /// Cookie settings for an environment; production always sets Secure
    pub fn for_environment(env: Environment) -> Self {
        Self {
            secure: env.is_production(),
            ..Default::default()
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Credential cookie configuration
    #[serde(default)]
    pub cookies: CookieConfig,

    /// Upper bound for a single refresh-store or identity-store call
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            cookies: CookieConfig::default(),
            store_timeout_ms: default_store_timeout_ms(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let jwt = JwtConfig::from_env()?;
        let store_timeout_ms = env_parsed("AUTH_STORE_TIMEOUT_MS", default_store_timeout_ms())?;

        let config = Self {
            jwt,
            cookies: CookieConfig::for_environment(env),
            store_timeout_ms,
        };
        config.jwt.validate()?;
        Ok(config)
    }

    /// Store call timeout as a `Duration`
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_store_timeout_ms() -> u64 {
    2_000
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_ttl, Duration::from_secs(900));
        assert_eq!(config.refresh_ttl, Duration::from_secs(604_800));
        assert_eq!(config.algorithm, "HS256");
        assert!(config.is_using_default_secret());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("access", "refresh")
            .with_access_ttl(Duration::from_secs(60))
            .with_refresh_ttl(Duration::from_secs(3600));

        assert_eq!(config.access_ttl, Duration::from_secs(60));
        assert_eq!(config.refresh_ttl, Duration::from_secs(3600));
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_validate_rejects_shared_secret() {
        let config = JwtConfig::new("same", "same");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_lifetimes() {
        let config = JwtConfig::new("a", "b")
            .with_access_ttl(Duration::from_secs(3600))
            .with_refresh_ttl(Duration::from_secs(60));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_other_algorithms() {
        let mut config = JwtConfig::new("a", "b");
        config.algorithm = "none".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cookie_config_secure_in_production() {
        assert!(CookieConfig::for_environment(Environment::Production).secure);
        assert!(!CookieConfig::for_environment(Environment::Development).secure);

        let config = CookieConfig::default();
        assert_eq!(config.access_name, "accessToken");
        assert_eq!(config.refresh_name, "refreshToken");
        assert_eq!(config.same_site, "Lax");
    }

    #[test]
    fn test_jwt_config_from_env_parses_units() {
        temp_env::with_vars(
            [
                ("JWT_ACCESS_SECRET", Some("a-secret")),
                ("JWT_REFRESH_SECRET", Some("r-secret")),
                ("JWT_ACCESS_EXPIRE", Some("10m")),
                ("JWT_REFRESH_EXPIRE", Some("2d")),
            ],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.access_ttl, Duration::from_secs(600));
                assert_eq!(config.refresh_ttl, Duration::from_secs(172_800));
                assert_eq!(config.access_secret, "a-secret");
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_rejects_bad_unit() {
        temp_env::with_var("JWT_REFRESH_EXPIRE", Some("7w"), || {
            assert!(matches!(
                JwtConfig::from_env(),
                Err(ConfigError::InvalidTtl { .. })
            ));
        });
    }
}
