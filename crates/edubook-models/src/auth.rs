//! Identity, principal and authentication DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::profiles::Profile;
use crate::roles::UserRole;

/// An account known to the identity provider. The password hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// The authenticated caller of a request, resolved from the credential and the
/// caller's identity and profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl Principal {
    pub fn is_instructor(&self) -> bool {
        self.role == UserRole::Instructor
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[serde(default, deserialize_with = "crate::text::deserialize_trimmed")]
    #[validate(length(min = 1, max = 200, message = "full_name is required"))]
    pub full_name: String,
    /// Either `student` or `instructor`.
    #[serde(default)]
    #[validate(custom(function = "crate::roles::validate_role"))]
    pub role: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Public view of an account: identity plus profile.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
}

impl UserResponse {
    pub fn new(identity: &Identity, profile: &Profile) -> Self {
        Self {
            id: identity.id,
            email: identity.email.clone(),
            full_name: profile.full_name.clone(),
            role: profile.role,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignupResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_signup_request_missing_fields_all_reported() {
        let dto: SignupRequest = serde_json::from_str("{}").unwrap();
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("full_name"));
        assert!(fields.contains_key("role"));
    }

    #[test]
    fn test_signup_request_rejects_unknown_role() {
        let dto: SignupRequest = serde_json::from_str(
            r#"{"email":"a@b.com","password":"secret1","full_name":"Ada","role":"admin"}"#,
        )
        .unwrap();
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
        assert!(errors.field_errors().contains_key("role"));
    }

    #[test]
    fn test_signup_request_valid() {
        let dto: SignupRequest = serde_json::from_str(
            r#"{"email":"a@b.com","password":"secret1","full_name":"Ada","role":"instructor"}"#,
        )
        .unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_signup_request_rejects_blank_full_name() {
        let dto: SignupRequest = serde_json::from_str(
            r#"{"email":"a@b.com","password":"secret1","full_name":"   ","role":"student"}"#,
        )
        .unwrap();
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
        assert!(errors.field_errors().contains_key("full_name"));
    }

    #[test]
    fn test_login_request_requires_password() {
        let dto: LoginRequest = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_principal_role_helpers() {
        let principal = Principal {
            id: Uuid::new_v4(),
            email: "i@example.com".to_string(),
            role: UserRole::Instructor,
        };
        assert!(principal.is_instructor());

        let principal = Principal {
            role: UserRole::Student,
            ..principal
        };
        assert!(!principal.is_instructor());
    }
}
