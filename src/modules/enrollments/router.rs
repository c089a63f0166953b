use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use super::controller::{
    create_enrollment, delete_enrollment, get_course_enrollments, get_enrollments,
    get_instructor_enrollments, get_student_enrollments,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn init_enrollments_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_enrollment).get(get_enrollments))
        .route("/student/{id}", get(get_student_enrollments))
        .route("/instructor/{id}", get(get_instructor_enrollments))
        .route("/course/{id}", get(get_course_enrollments))
        .route("/{id}", delete(delete_enrollment))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
