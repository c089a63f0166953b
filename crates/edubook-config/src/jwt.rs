use std::env;

use crate::{ConfigError, parse_flag, parse_or};

/// Seven days, the lifetime of both the token and its cookie.
pub const DEFAULT_TOKEN_EXPIRY: i64 = 604_800;
/// One year.
pub const MAX_TOKEN_EXPIRY: i64 = 31_536_000;
pub const DEFAULT_COOKIE_NAME: &str = "jwt";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds.
    pub token_expiry: i64,
    pub cookie_name: String,
    /// Marks the credential cookie `Secure`. Only disable for plain-http local development.
    pub cookie_secure: bool,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let token_expiry = parse_or(&lookup, "JWT_EXPIRY", DEFAULT_TOKEN_EXPIRY)?;
        if token_expiry <= 0 || token_expiry > MAX_TOKEN_EXPIRY {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRY",
                value: token_expiry.to_string(),
            });
        }

        Ok(Self {
            secret,
            token_expiry,
            cookie_name: lookup("JWT_COOKIE_NAME")
                .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string()),
            cookie_secure: parse_flag(&lookup, "COOKIE_SECURE", true),
        })
    }
}
