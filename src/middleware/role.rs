//! Role and ownership checks.
//!
//! Role requirements are expressed as extractors so a handler's signature shows
//! who may call it. Ownership is checked in the handler once the resource id is
//! known.

use edubook_core::AppError;
use edubook_models::UserRole;
use tracing::warn;
use uuid::Uuid;

use crate::metrics::track_authorization_denied;
use crate::middleware::auth::AuthUser;

/// Fails with 403 unless the caller holds `required_role`.
///
/// # Example
///
/// ```rust,ignore
/// check_role(&auth_user, UserRole::Instructor, "create_course")?;
/// ```
pub fn check_role(
    auth_user: &AuthUser,
    required_role: UserRole,
    action: &'static str,
) -> Result<(), AppError> {
    if auth_user.role() != required_role {
        return Err(deny(
            auth_user,
            action,
            format!("Access denied. Only {}s can perform this action", required_role),
        ));
    }

    Ok(())
}

/// Fails with 403 unless `owner_id` is the caller.
pub fn ensure_owner(
    auth_user: &AuthUser,
    owner_id: Uuid,
    action: &'static str,
) -> Result<(), AppError> {
    if auth_user.id() != owner_id {
        return Err(deny(
            auth_user,
            action,
            "Access denied. You do not own this resource".to_string(),
        ));
    }

    Ok(())
}

/// Builds a 403 and records the denial.
pub fn deny(auth_user: &AuthUser, action: &'static str, message: String) -> AppError {
    warn!(
        user_id = %auth_user.id(),
        role = %auth_user.role(),
        action,
        "Authorization denied"
    );
    track_authorization_denied(action);
    AppError::forbidden(message)
}

/// Declares an extractor that admits only callers with the given role.
#[macro_export]
macro_rules! require_role {
    ($name:ident, $role:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = edubook_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;
                $crate::middleware::role::check_role(&auth_user, $role, stringify!($name))?;
                Ok($name(auth_user))
            }
        }
    };
}

require_role!(RequireInstructor, edubook_models::UserRole::Instructor);
require_role!(RequireStudent, edubook_models::UserRole::Student);
