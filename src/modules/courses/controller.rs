use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use edubook_core::AppError;
use edubook_models::{
    CourseMutationResponse, CourseResponse, CoursesResponse, CreateCourseRequest,
    MessageResponse, UpdateCourseRequest,
};
use tracing::instrument;
use uuid::Uuid;

use super::service::CourseService;
use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireInstructor;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseMutationResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 403, description = "Caller is not an instructor, or instructor_id is not the caller", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    RequireInstructor(auth_user): RequireInstructor,
    ValidatedJson(dto): ValidatedJson<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseMutationResponse>), AppError> {
    let course = CourseService::create_course(&state, &auth_user, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(CourseMutationResponse {
            message: "Course created successfully".to_string(),
            course,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/courses",
    responses(
        (status = 200, description = "All courses, newest first, with instructor names", body = CoursesResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(State(state): State<AppState>) -> Result<Json<CoursesResponse>, AppError> {
    let courses = CourseService::list_courses(&state).await?;
    Ok(Json(CoursesResponse { courses }))
}

#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseResponse>, AppError> {
    let course = CourseService::get_course(&state, id).await?;
    Ok(Json(CourseResponse { course }))
}

#[utoipa::path(
    put,
    path = "/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseMutationResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 403, description = "Caller does not own the course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseRequest>,
) -> Result<Json<CourseMutationResponse>, AppError> {
    let course = CourseService::update_course(&state, &auth_user, id, dto.into()).await?;

    Ok(Json(CourseMutationResponse {
        message: "Course updated successfully".to_string(),
        course,
    }))
}

#[utoipa::path(
    delete,
    path = "/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course and its enrollments deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 403, description = "Caller does not own the course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::delete_course(&state, &auth_user, id).await?;
    Ok(Json(MessageResponse::new("Course deleted successfully")))
}
