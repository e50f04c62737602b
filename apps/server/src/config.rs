//! Application configuration loaded from environment variables.
//!
//! Fail-fast: required variables must be present and valid or startup aborts
//! with a clear message.

use std::env;

use thiserror::Error;

/// Default bind address.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Default access-token lifetime: 24 hours.
const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;

/// Configuration loading errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Runtime configuration for the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address to bind, e.g. `0.0.0.0:8000`.
    pub bind_addr: String,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// HS256 signing secret for access tokens.
    pub jwt_secret: String,
    /// Access-token lifetime in seconds.
    pub token_ttl_secs: i64,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load via a lookup function; the indirection keeps this testable
    /// without mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let jwt_secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.len() < 32 {
            return Err(ConfigError::Invalid {
                name: "JWT_SECRET",
                reason: "must be at least 32 characters".to_string(),
            });
        }

        let token_ttl_secs = match lookup("TOKEN_TTL_SECS") {
            Some(raw) => raw.parse::<i64>().ok().filter(|v| *v > 0).ok_or_else(|| {
                ConfigError::Invalid {
                    name: "TOKEN_TTL_SECS",
                    reason: format!("expected a positive integer, got {raw:?}"),
                }
            })?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };

        Ok(Self {
            bind_addr,
            database_url,
            jwt_secret,
            token_ttl_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(map: &'a HashMap<&'static str, &'a str>) -> impl Fn(&'static str) -> Option<String> + 'a {
        move |name| map.get(name).map(|v| (*v).to_string())
    }

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("DATABASE_URL", "postgres://localhost/mocksim"),
            ("JWT_SECRET", "0123456789abcdef0123456789abcdef"),
        ])
    }

    #[test]
    fn test_defaults_applied() {
        let env = base_env();
        let config = AppConfig::from_lookup(lookup_from(&env)).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.token_ttl_secs, DEFAULT_TOKEN_TTL_SECS);
    }

    #[test]
    fn test_missing_required_vars() {
        let mut env = base_env();
        env.remove("DATABASE_URL");
        let err = AppConfig::from_lookup(lookup_from(&env)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));

        let mut env = base_env();
        env.remove("JWT_SECRET");
        let err = AppConfig::from_lookup(lookup_from(&env)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut env = base_env();
        env.insert("JWT_SECRET", "too-short");
        let err = AppConfig::from_lookup(lookup_from(&env)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "JWT_SECRET", .. }));
    }

    #[test]
    fn test_ttl_parsing() {
        let mut env = base_env();
        env.insert("TOKEN_TTL_SECS", "3600");
        let config = AppConfig::from_lookup(lookup_from(&env)).unwrap();
        assert_eq!(config.token_ttl_secs, 3600);

        env.insert("TOKEN_TTL_SECS", "-5");
        assert!(AppConfig::from_lookup(lookup_from(&env)).is_err());

        env.insert("TOKEN_TTL_SECS", "soon");
        assert!(AppConfig::from_lookup(lookup_from(&env)).is_err());
    }
}
