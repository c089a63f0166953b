//! Operations behind the `edubook-cli` binary.
//!
//! Written against the store traits so they run unchanged on PostgreSQL and in
//! tests.

pub mod seeder;

use edubook_core::AppError;
use edubook_db::{IdentityProvider, ProfileStore};
use edubook_models::{NewProfile, SignupRequest, UserResponse, UserRole};
use tracing::info;
use validator::Validate;

/// Creates an account with its profile, applying the same validation as signup.
pub async fn create_user<S>(
    store: &S,
    email: &str,
    password: &str,
    full_name: &str,
    role: UserRole,
) -> Result<UserResponse, AppError>
where
    S: IdentityProvider + ProfileStore,
{
    let full_name = full_name.trim();
    SignupRequest {
        email: email.to_string(),
        password: password.to_string(),
        full_name: full_name.to_string(),
        role: role.to_string(),
    }
    .validate()?;

    let identity = store.sign_up(email, password).await?;
    let profile = store
        .insert_profile(NewProfile {
            id: identity.id,
            full_name: full_name.to_string(),
            role,
        })
        .await?;

    info!(user_id = %identity.id, role = %role, "User created from CLI");
    Ok(UserResponse::new(&identity, &profile))
}
