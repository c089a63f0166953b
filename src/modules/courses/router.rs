use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::controller::{create_course, delete_course, get_course, get_courses, update_course};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

/// Listing is public; everything else requires a signed-in caller.
pub fn init_courses_router(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, require_auth);

    Router::new()
        .route(
            "/",
            post(create_course).route_layer(auth.clone()).get(get_courses),
        )
        .route(
            "/{id}",
            get(get_course)
                .put(update_course)
                .delete(delete_course)
                .route_layer(auth),
        )
}
