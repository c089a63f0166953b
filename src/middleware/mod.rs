//! Request authentication and authorization.
//!
//! - [`auth`]: resolves the calling [`Principal`](edubook_models::Principal) from the
//!   credential cookie, as a route layer ([`auth::require_auth`]) and as an extractor
//!   ([`auth::AuthUser`])
//! - [`role`]: role-gated extractors and ownership checks used inside handlers
//!
//! # Authentication Flow
//!
//! 1. The credential transport pulls the token from the request cookie
//! 2. The token is verified (signature and expiry, no leeway)
//! 3. The identity and profile behind `sub` are loaded into a `Principal`
//! 4. The principal is stored in request extensions and the handler runs
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::role::{RequireInstructor, ensure_owner};
//!
//! async fn create_course(RequireInstructor(auth_user): RequireInstructor) -> impl IntoResponse {
//!     // Only runs for instructors
//! }
//! ```

pub mod auth;
pub mod role;
