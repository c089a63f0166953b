use axum::{
    Router, middleware,
    routing::{get, put},
};

use super::controller::{get_profile, get_profiles, update_profile};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

/// Profiles are publicly readable; updates require a signed-in caller.
pub fn init_profiles_router(state: AppState) -> Router<AppState> {
    Router::new().route("/", get(get_profiles)).route(
        "/{id}",
        put(update_profile)
            .route_layer(middleware::from_fn_with_state(state, require_auth))
            .get(get_profile),
    )
}
