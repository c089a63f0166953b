//! # EduBook Auth
//!
//! Session issuance primitives for the EduBook API.
//!
//! - [`claims`]: the access token claim set
//! - [`jwt`]: token creation and strict verification
//! - [`transport`]: how tokens reach the client and come back

pub mod claims;
pub mod jwt;
pub mod transport;

pub use claims::Claims;
pub use jwt::{TokenError, create_access_token, encode_claims, ensure_signing_secret, verify_token};
pub use transport::{CookieTransport, CredentialTransport};
