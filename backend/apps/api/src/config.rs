//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - PostgreSQL connection string
//! - `AUTH_TOKEN_SECRET` - HS256 signing secret (at least 32 bytes)
//! - `PAYMENT_API_KEY` - Payment processor secret key
//!
//! ## Optional
//! - `AUTH_TOKEN_TTL_SECS` - Token lifetime, 1 to 2592000 (default: 86400)
//! - `PASSWORD_PEPPER` - Application-wide pepper appended before hashing
//! - `PASSWORD_HASH_MEMORY_KIB` / `PASSWORD_HASH_ITERATIONS` /
//!   `PASSWORD_HASH_PARALLELISM` - Argon2id cost (default: argon2 defaults)
//! - `PAYMENT_API_BASE_URL` - Processor host (default: https://api.stripe.com)
//! - `PAYMENT_CURRENCY` - Currency when a request names none (default: usd)
//! - `HOST` / `PORT` - Bind address (default: 0.0.0.0:31113)
//! - `FRONTEND_ORIGINS` - Comma-separated CORS origins (default: http://localhost:3000)
//! - `REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `DATABASE_MAX_CONNECTIONS` - Pool size (default: 5)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use auth::application::config::MAX_TOKEN_TTL;
use platform::password::HashingConfig;
use platform::token::MIN_SECRET_LENGTH;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 3600;
const DEFAULT_PAYMENT_BASE_URL: &str = "https://api.stripe.com";
const DEFAULT_PAYMENT_CURRENCY: &str = "usd";
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 31113;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

/// Server configuration
#[derive(Debug)]
pub struct ServerConfig {
    pub database_url: SecretString,
    pub database_max_connections: u32,
    pub token_secret: SecretString,
    pub token_ttl: Duration,
    pub password_pepper: Option<SecretString>,
    pub hash_cost: HashCost,
    pub payment_api_key: SecretString,
    pub payment_base_url: String,
    pub payment_currency: String,
    pub host: IpAddr,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from the process environment (and `.env` if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let token_secret = env.required("AUTH_TOKEN_SECRET")?;
        if token_secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::InvalidEnvVar(
                "AUTH_TOKEN_SECRET".to_string(),
                format!("must be at least {} bytes", MIN_SECRET_LENGTH),
            ));
        }

        let token_ttl_secs: u64 = env.parsed_or("AUTH_TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?;
        if !(1..=MAX_TOKEN_TTL.as_secs()).contains(&token_ttl_secs) {
            return Err(ConfigError::InvalidEnvVar(
                "AUTH_TOKEN_TTL_SECS".to_string(),
                format!("must be between 1 and {}", MAX_TOKEN_TTL.as_secs()),
            ));
        }

        let defaults = HashingConfig::default();
        let hash_cost = HashCost {
            memory_kib: env.parsed_or("PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib())?,
            iterations: env.parsed_or("PASSWORD_HASH_ITERATIONS", defaults.iterations())?,
            parallelism: env.parsed_or("PASSWORD_HASH_PARALLELISM", defaults.parallelism())?,
        };

        let frontend_origins = env
            .optional("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            database_url: SecretString::from(env.required("DATABASE_URL")?),
            database_max_connections: env
                .parsed_or("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
            token_secret: SecretString::from(token_secret),
            token_ttl: Duration::from_secs(token_ttl_secs),
            password_pepper: env.optional("PASSWORD_PEPPER").map(SecretString::from),
            hash_cost,
            payment_api_key: SecretString::from(env.required("PAYMENT_API_KEY")?),
            payment_base_url: env
                .optional("PAYMENT_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PAYMENT_BASE_URL.to_string()),
            payment_currency: env
                .optional("PAYMENT_CURRENCY")
                .unwrap_or_else(|| DEFAULT_PAYMENT_CURRENCY.to_string()),
            host: env.parsed_or("HOST", DEFAULT_HOST)?,
            port: env.parsed_or("PORT", DEFAULT_PORT)?,
            frontend_origins,
            request_timeout: Duration::from_secs(
                env.parsed_or("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            ),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Argon2id settings with the pepper applied
    pub fn hashing(&self) -> Result<HashingConfig, ConfigError> {
        let config = HashingConfig::new(
            self.hash_cost.memory_kib,
            self.hash_cost.iterations,
            self.hash_cost.parallelism,
        )
        .map_err(|e| ConfigError::InvalidEnvVar("PASSWORD_HASH_*".to_string(), e.to_string()))?;

        Ok(match &self.password_pepper {
            Some(pepper) => config.with_pepper(pepper.expose_secret().as_bytes().to_vec()),
            None => config,
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Unset and blank are the same
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn parsed_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DATABASE_URL", "postgres://localhost/shop"),
            ("AUTH_TOKEN_SECRET", SECRET),
            ("PAYMENT_API_KEY", "sk_test_123"),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = load(&required()).unwrap();

        assert_eq!(config.token_ttl, Duration::from_secs(86400));
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:31113");
        assert_eq!(config.frontend_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.payment_base_url, "https://api.stripe.com");
        assert_eq!(config.payment_currency, "usd");
        assert!(config.password_pepper.is_none());

        let defaults = HashingConfig::default();
        assert_eq!(config.hash_cost.memory_kib, defaults.memory_kib());
        assert_eq!(config.hash_cost.iterations, defaults.iterations());
    }

    #[test]
    fn test_missing_required() {
        for key in ["DATABASE_URL", "AUTH_TOKEN_SECRET", "PAYMENT_API_KEY"] {
            let vars: Vec<_> = required().into_iter().filter(|(k, _)| *k != key).collect();
            match load(&vars) {
                Err(ConfigError::MissingEnvVar(missing)) => assert_eq!(missing, key),
                other => panic!("expected missing {key}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_short_token_secret() {
        let mut vars = required();
        vars.retain(|(k, _)| *k != "AUTH_TOKEN_SECRET");
        vars.push(("AUTH_TOKEN_SECRET", "too-short"));

        assert!(matches!(
            load(&vars),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "AUTH_TOKEN_SECRET"
        ));
    }

    #[test]
    fn test_token_ttl_out_of_range() {
        for ttl in ["0", "2592001", "10000000000000"] {
            let mut vars = required();
            vars.push(("AUTH_TOKEN_TTL_SECS", ttl));

            assert!(
                matches!(
                    load(&vars),
                    Err(ConfigError::InvalidEnvVar(key, _)) if key == "AUTH_TOKEN_TTL_SECS"
                ),
                "ttl {ttl} should be rejected"
            );
        }

        let mut vars = required();
        vars.push(("AUTH_TOKEN_TTL_SECS", "2592000"));
        assert_eq!(load(&vars).unwrap().token_ttl, MAX_TOKEN_TTL);
    }

    #[test]
    fn test_overrides() {
        let mut vars = required();
        vars.extend([
            ("AUTH_TOKEN_TTL_SECS", "3600"),
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("FRONTEND_ORIGINS", "https://a.example, https://b.example,"),
            ("PASSWORD_PEPPER", "pepper"),
            ("PASSWORD_HASH_MEMORY_KIB", "8192"),
        ]);
        let config = load(&vars).unwrap();

        assert_eq!(config.token_ttl, Duration::from_secs(3600));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.frontend_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.hashing().unwrap().memory_kib(), 8192);
        assert!(config.password_pepper.is_some());
    }

    #[test]
    fn test_invalid_number() {
        let mut vars = required();
        vars.push(("PORT", "eighty"));

        assert!(matches!(
            load(&vars),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "PORT"
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = load(&required()).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains(SECRET));
        assert!(!debug.contains("sk_test_123"));
    }
}
