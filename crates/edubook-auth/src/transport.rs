//! How access tokens travel between client and server.
//!
//! Handlers never touch cookies directly. They ask a [`CredentialTransport`] for
//! the presented token and for the `Set-Cookie` values that issue or revoke one,
//! so the carrier can be swapped without touching route code.

use axum::http::{HeaderMap, HeaderValue};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use edubook_config::JwtConfig;
use edubook_core::AppError;

pub trait CredentialTransport: Send + Sync {
    /// Returns the token presented on a request, if any.
    fn extract(&self, headers: &HeaderMap) -> Option<String>;

    /// Header value that hands `token` to the client.
    fn issue(&self, token: &str) -> Result<HeaderValue, AppError>;

    /// Header value that makes the client discard its token.
    fn revoke(&self) -> Result<HeaderValue, AppError>;
}

/// Carries the token in an HttpOnly, SameSite=Strict cookie scoped to `/`.
#[derive(Debug, Clone)]
pub struct CookieTransport {
    name: String,
    secure: bool,
    max_age: time::Duration,
}

impl CookieTransport {
    pub fn new(name: impl Into<String>, secure: bool, max_age_secs: i64) -> Self {
        Self {
            name: name.into(),
            secure,
            max_age: time::Duration::seconds(max_age_secs),
        }
    }

    pub fn from_config(jwt_config: &JwtConfig) -> Self {
        Self::new(
            jwt_config.cookie_name.clone(),
            jwt_config.cookie_secure,
            jwt_config.token_expiry,
        )
    }

    pub fn cookie_name(&self) -> &str {
        &self.name
    }

    fn cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build((self.name.clone(), value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .max_age(self.max_age)
            .build()
    }
}

fn header_value(cookie: &Cookie<'_>) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| AppError::internal_error(format!("Invalid cookie header: {}", e)))
}

impl CredentialTransport for CookieTransport {
    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        CookieJar::from_headers(headers)
            .get(&self.name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }

    fn issue(&self, token: &str) -> Result<HeaderValue, AppError> {
        header_value(&self.cookie(token.to_string()))
    }

    fn revoke(&self) -> Result<HeaderValue, AppError> {
        let mut cookie = self.cookie(String::new());
        cookie.make_removal();
        header_value(&cookie)
    }
}
