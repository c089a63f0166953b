use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::IntoResponse,
};
use edubook_core::AppError;
use edubook_models::{
    LoginRequest, LoginResponse, MeResponse, MessageResponse, SignupRequest, SignupResponse,
};
use tracing::instrument;

use super::service::AuthService;
use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new student or instructor
///
/// Creates the account and its profile, then signs the caller in by setting the
/// credential cookie.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created, credential cookie set", body = SignupResponse),
        (status = 400, description = "Validation error or email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = AuthService::signup(&state, dto).await?;
    let cookie = state.transport.issue(&session.token)?;

    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, cookie)],
        Json(SignupResponse {
            message: "Signup successful!".to_string(),
            user: session.user,
        }),
    ))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in, credential cookie set", body = LoginResponse),
        (status = 400, description = "Invalid credentials or validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = AuthService::login(&state, dto).await?;
    let cookie = state.transport.issue(&session.token)?;

    Ok((
        [(SET_COOKIE, cookie)],
        Json(LoginResponse {
            token: session.token,
            user: session.user,
        }),
    ))
}

/// Sign out by expiring the credential cookie
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Credential cookie cleared", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let cookie = state.transport.revoke()?;

    Ok((
        [(SET_COOKIE, cookie)],
        Json(MessageResponse::new("Logged out successfully")),
    ))
}

/// Get the signed-in user
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    let user = AuthService::current_user(&state, &auth_user.0).await?;
    Ok(Json(MeResponse { user }))
}
