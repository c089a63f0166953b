use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use edubook_core::AppError;
use edubook_models::{
    CreateEnrollmentRequest, EnrollmentCreatedResponse, EnrollmentsResponse, MessageResponse,
};
use tracing::instrument;
use uuid::Uuid;

use super::service::EnrollmentService;
use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireStudent;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/enrollments",
    request_body = CreateEnrollmentRequest,
    responses(
        (status = 201, description = "Enrolled", body = EnrollmentCreatedResponse),
        (status = 400, description = "Validation error or already enrolled", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 403, description = "Caller is not a student, or student_id is not the caller", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_enrollment(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
    ValidatedJson(dto): ValidatedJson<CreateEnrollmentRequest>,
) -> Result<(StatusCode, Json<EnrollmentCreatedResponse>), AppError> {
    let enrollment = EnrollmentService::create_enrollment(&state, &auth_user, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(EnrollmentCreatedResponse {
            message: "Enrolled successfully".to_string(),
            enrollment,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/enrollments",
    responses(
        (status = 200, description = "The caller's enrollments (students) or enrollments in the caller's courses (instructors)", body = EnrollmentsResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_enrollments(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<EnrollmentsResponse>, AppError> {
    let enrollments = EnrollmentService::list_for_caller(&state, &auth_user).await?;
    Ok(Json(EnrollmentsResponse { enrollments }))
}

#[utoipa::path(
    get,
    path = "/enrollments/student/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Enrollments of the student", body = EnrollmentsResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 403, description = "Caller is not this student", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_student_enrollments(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrollmentsResponse>, AppError> {
    let enrollments = EnrollmentService::list_for_student(&state, &auth_user, id).await?;
    Ok(Json(EnrollmentsResponse { enrollments }))
}

#[utoipa::path(
    get,
    path = "/enrollments/instructor/{id}",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    responses(
        (status = 200, description = "Enrollments across the instructor's courses", body = EnrollmentsResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 403, description = "Caller is not this instructor", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_instructor_enrollments(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrollmentsResponse>, AppError> {
    let enrollments = EnrollmentService::list_for_instructor(&state, &auth_user, id).await?;
    Ok(Json(EnrollmentsResponse { enrollments }))
}

#[utoipa::path(
    get,
    path = "/enrollments/course/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Enrollments in the course", body = EnrollmentsResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 403, description = "Caller does not teach the course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_course_enrollments(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrollmentsResponse>, AppError> {
    let enrollments = EnrollmentService::list_for_course(&state, &auth_user, id).await?;
    Ok(Json(EnrollmentsResponse { enrollments }))
}

#[utoipa::path(
    delete,
    path = "/enrollments/{id}",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Enrollment removed", body = MessageResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 403, description = "Caller is neither the student nor the course instructor", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse)
    ),
    tag = "Enrollments",
    security(("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_enrollment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    EnrollmentService::delete_enrollment(&state, &auth_user, id).await?;
    Ok(Json(MessageResponse::new("Enrollment deleted successfully")))
}
