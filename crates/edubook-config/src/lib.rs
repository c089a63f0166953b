//! # EduBook Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing and credential cookie settings
//! - [`cors`]: allowed browser origins
//! - [`server`]: listen address
//! - [`database`]: PostgreSQL pool settings
//! - [`logging`]: log level, format and optional file output
//!
//! Each config exposes `from_env()` plus a `from_lookup()` variant that takes any
//! key → value function, which is what the tests use instead of mutating the
//! process environment.
//!
//! # Example
//!
//! ```ignore
//! use edubook_config::{CorsConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env()?; // fails when JWT_SECRET is unset
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod logging;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Configuration that cannot be loaded. Always fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

pub(crate) fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

pub(crate) fn parse_flag<F>(lookup: &F, key: &'static str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| {
            let v = v.trim().to_lowercase();
            v == "true" || v == "1"
        })
        .unwrap_or(default)
}
