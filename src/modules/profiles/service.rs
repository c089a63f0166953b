use anyhow::anyhow;
use edubook_core::AppError;
use edubook_models::{Profile, ProfileChanges};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::ensure_owner;
use crate::state::AppState;

const PROFILE_NOT_FOUND: &str = "Profile not found";

pub struct ProfileService;

impl ProfileService {
    #[instrument(skip(state))]
    pub async fn list_profiles(state: &AppState) -> Result<Vec<Profile>, AppError> {
        Ok(state.profiles.list_profiles().await?)
    }

    #[instrument(skip(state))]
    pub async fn get_profile(state: &AppState, profile_id: Uuid) -> Result<Profile, AppError> {
        state
            .profiles
            .find_profile(profile_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(PROFILE_NOT_FOUND)))
    }

    /// Users may only edit their own profile.
    #[instrument(skip(state, changes))]
    pub async fn update_profile(
        state: &AppState,
        auth_user: &AuthUser,
        profile_id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Profile, AppError> {
        ensure_owner(auth_user, profile_id, "update_profile")?;

        let profile = state
            .profiles
            .update_profile(profile_id, changes)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(PROFILE_NOT_FOUND)))?;

        info!(profile_id = %profile.id, "Profile updated");
        Ok(profile)
    }
}
