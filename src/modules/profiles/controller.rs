use axum::{
    Json,
    extract::{Path, State},
};
use edubook_core::AppError;
use edubook_models::{
    ProfileResponse, ProfileUpdatedResponse, ProfilesResponse, UpdateProfileRequest,
};
use tracing::instrument;
use uuid::Uuid;

use super::service::ProfileService;
use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/profiles",
    responses(
        (status = 200, description = "All profiles", body = ProfilesResponse)
    ),
    tag = "Profiles"
)]
#[instrument(skip(state))]
pub async fn get_profiles(
    State(state): State<AppState>,
) -> Result<Json<ProfilesResponse>, AppError> {
    let profiles = ProfileService::list_profiles(&state).await?;
    Ok(Json(ProfilesResponse { profiles }))
}

#[utoipa::path(
    get,
    path = "/profiles/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Profile found", body = ProfileResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    tag = "Profiles"
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = ProfileService::get_profile(&state, id).await?;
    Ok(Json(ProfileResponse { profile }))
}

#[utoipa::path(
    put,
    path = "/profiles/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileUpdatedResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 403, description = "Profile belongs to another user", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    tag = "Profiles",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ProfileUpdatedResponse>, AppError> {
    let profile =
        ProfileService::update_profile(&state, &auth_user, id, dto.into_changes()).await?;

    Ok(Json(ProfileUpdatedResponse {
        message: "Profile updated successfully".to_string(),
        profile,
    }))
}
