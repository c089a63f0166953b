//! Access token creation and verification.
//!
//! Tokens are HS256-signed JWTs whose only identity claim is the subject (the
//! user ID). Verification is strict: no clock leeway is granted, so a token is
//! rejected from the first second after its `exp` claim.
//!
//! # Example
//!
//! ```ignore
//! use edubook_auth::{create_access_token, verify_token};
//! use edubook_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = create_access_token(user_id, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sub, user_id.to_string());
//! ```

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use thiserror::Error;
use uuid::Uuid;

use edubook_config::{JwtConfig, jwt::MAX_TOKEN_EXPIRY};
use edubook_core::AppError;

use crate::claims::Claims;

/// Why a presented token was rejected.
///
/// All variants surface to clients as the same 401 response; the distinction is
/// kept for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    SignatureInvalid,
    #[error("token has expired")]
    Expired,
}

impl TokenError {
    /// Short label used as a metrics tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenError::Malformed => "malformed",
            TokenError::SignatureInvalid => "signature_invalid",
            TokenError::Expired => "expired",
        }
    }
}

impl From<TokenError> for AppError {
    fn from(_: TokenError) -> Self {
        AppError::unauthorized("Invalid or expired token".to_string())
    }
}

/// Fails with a 500 when no signing secret is configured.
///
/// Startup already refuses a missing `JWT_SECRET`; this guards configs built by
/// hand, e.g. in tests or the CLI.
pub fn ensure_signing_secret(jwt_config: &JwtConfig) -> Result<(), AppError> {
    if jwt_config.secret.is_empty() {
        return Err(AppError::internal_error(
            "JWT secret is not configured".to_string(),
        ));
    }
    Ok(())
}

/// Creates an access token for `user_id` valid for `jwt_config.token_expiry` seconds.
///
/// # Errors
///
/// Returns an internal error if the secret is empty, the expiry is outside
/// `1..=MAX_TOKEN_EXPIRY`, or encoding fails.
pub fn create_access_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    if !(1..=MAX_TOKEN_EXPIRY).contains(&jwt_config.token_expiry) {
        return Err(AppError::internal_error(format!(
            "JWT expiry out of range: {}",
            jwt_config.token_expiry
        )));
    }

    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + jwt_config.token_expiry as usize,
        iat: now,
    };

    encode_claims(&claims, jwt_config)
}

/// Signs an arbitrary claim set with the configured secret.
pub fn encode_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    ensure_signing_secret(jwt_config)?;

    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry and returns the embedded claims.
///
/// Callers are expected to have checked [`ensure_signing_secret`] first; an
/// empty secret here simply fails every signature.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
        _ => TokenError::Malformed,
    })
}
