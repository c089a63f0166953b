use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::roles::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProfile {
    pub id: Uuid,
    pub full_name: String,
    pub role: UserRole,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "crate::text::deserialize_optional_trimmed")]
    #[validate(length(min = 1, max = 200, message = "full_name must not be empty"))]
    pub full_name: Option<String>,
    #[validate(custom(function = "crate::roles::validate_role"))]
    pub role: Option<String>,
}

impl UpdateProfileRequest {
    /// Converts a validated request into store changes.
    pub fn into_changes(self) -> ProfileChanges {
        ProfileChanges {
            full_name: self.full_name,
            role: self.role.and_then(|r| r.parse().ok()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfilesResponse {
    pub profiles: Vec<Profile>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub profile: Profile,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileUpdatedResponse {
    pub message: String,
    pub profile: Profile,
}
