use anyhow::anyhow;
use edubook_auth::{create_access_token, ensure_signing_secret};
use edubook_core::{AppError, StoreError};
use edubook_models::{LoginRequest, NewProfile, Principal, SignupRequest, UserResponse, UserRole};
use tracing::{info, instrument, warn};

use crate::metrics::{track_jwt_issued, track_login_failure, track_login_success, track_signup};
use crate::state::AppState;

/// A freshly issued credential and the account it belongs to.
#[derive(Debug)]
pub struct Session {
    pub token: String,
    pub user: UserResponse,
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(state, dto), fields(email = %dto.email, role = %dto.role))]
    pub async fn signup(state: &AppState, dto: SignupRequest) -> Result<Session, AppError> {
        let role: UserRole = dto
            .role
            .parse()
            .map_err(|_| AppError::bad_request(anyhow!("Invalid role")))?;

        // Refuse before the identity is created rather than after.
        ensure_signing_secret(&state.jwt_config)?;

        let identity = state.identity.sign_up(&dto.email, &dto.password).await?;
        let profile = state
            .profiles
            .insert_profile(NewProfile {
                id: identity.id,
                full_name: dto.full_name,
                role,
            })
            .await?;

        let token = create_access_token(identity.id, &state.jwt_config)?;

        track_signup(role.as_str());
        track_jwt_issued();
        info!(user_id = %identity.id, "User signed up");

        Ok(Session {
            token,
            user: UserResponse::new(&identity, &profile),
        })
    }

    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<Session, AppError> {
        ensure_signing_secret(&state.jwt_config)?;

        let identity = state
            .identity
            .sign_in(&dto.email, &dto.password)
            .await
            .inspect_err(|e| {
                if matches!(e, StoreError::InvalidCredentials) {
                    warn!("Login failed: invalid credentials");
                    track_login_failure();
                }
            })?;

        let profile = state
            .profiles
            .find_profile(identity.id)
            .await?
            .ok_or_else(|| {
                AppError::internal_error(format!("Profile missing for user {}", identity.id))
            })?;

        let token = create_access_token(identity.id, &state.jwt_config)?;

        track_login_success(profile.role.as_str());
        track_jwt_issued();
        info!(user_id = %identity.id, "User logged in");

        Ok(Session {
            token,
            user: UserResponse::new(&identity, &profile),
        })
    }

    #[instrument(skip(state))]
    pub async fn current_user(
        state: &AppState,
        principal: &Principal,
    ) -> Result<UserResponse, AppError> {
        let profile = state
            .profiles
            .find_profile(principal.id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid or expired token".to_string()))?;

        Ok(UserResponse {
            id: principal.id,
            email: principal.email.clone(),
            full_name: profile.full_name,
            role: profile.role,
        })
    }
}
