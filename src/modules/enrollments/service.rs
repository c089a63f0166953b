use anyhow::anyhow;
use edubook_core::AppError;
use edubook_models::{
    CreateEnrollmentRequest, Enrollment, EnrollmentDetail, EnrollmentFilter, NewEnrollment,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{deny, ensure_owner};
use crate::state::AppState;

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enrolls the calling student. Uniqueness of the (course, student) pair is
    /// left to the store, which rejects a second insert atomically.
    #[instrument(skip(state))]
    pub async fn create_enrollment(
        state: &AppState,
        auth_user: &AuthUser,
        dto: CreateEnrollmentRequest,
    ) -> Result<Enrollment, AppError> {
        let course_id = dto
            .course_id
            .ok_or_else(|| AppError::bad_request(anyhow!("course_id is required")))?;
        let student_id = dto.student_id.unwrap_or(auth_user.id());
        ensure_owner(auth_user, student_id, "create_enrollment")?;

        let enrollment = state
            .enrollments
            .insert_enrollment(NewEnrollment {
                course_id,
                student_id,
            })
            .await?;

        info!(enrollment_id = %enrollment.id, course_id = %course_id, "Student enrolled");
        Ok(enrollment)
    }

    /// Students see their own enrollments, instructors the enrollments in their courses.
    #[instrument(skip(state))]
    pub async fn list_for_caller(
        state: &AppState,
        auth_user: &AuthUser,
    ) -> Result<Vec<EnrollmentDetail>, AppError> {
        let filter = if auth_user.0.is_instructor() {
            EnrollmentFilter::Instructor(auth_user.id())
        } else {
            EnrollmentFilter::Student(auth_user.id())
        };

        Ok(state.enrollments.list_enrollments(filter).await?)
    }

    #[instrument(skip(state))]
    pub async fn list_for_student(
        state: &AppState,
        auth_user: &AuthUser,
        student_id: Uuid,
    ) -> Result<Vec<EnrollmentDetail>, AppError> {
        ensure_owner(auth_user, student_id, "list_student_enrollments")?;

        Ok(state
            .enrollments
            .list_enrollments(EnrollmentFilter::Student(student_id))
            .await?)
    }

    #[instrument(skip(state))]
    pub async fn list_for_instructor(
        state: &AppState,
        auth_user: &AuthUser,
        instructor_id: Uuid,
    ) -> Result<Vec<EnrollmentDetail>, AppError> {
        ensure_owner(auth_user, instructor_id, "list_instructor_enrollments")?;

        Ok(state
            .enrollments
            .list_enrollments(EnrollmentFilter::Instructor(instructor_id))
            .await?)
    }

    #[instrument(skip(state))]
    pub async fn list_for_course(
        state: &AppState,
        auth_user: &AuthUser,
        course_id: Uuid,
    ) -> Result<Vec<EnrollmentDetail>, AppError> {
        let course = state
            .courses
            .find_course(course_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))?;
        ensure_owner(auth_user, course.instructor_id, "list_course_enrollments")?;

        Ok(state
            .enrollments
            .list_enrollments(EnrollmentFilter::Course(course_id))
            .await?)
    }

    /// Removes an enrollment on behalf of its student or the course's instructor.
    #[instrument(skip(state))]
    pub async fn delete_enrollment(
        state: &AppState,
        auth_user: &AuthUser,
        enrollment_id: Uuid,
    ) -> Result<(), AppError> {
        if state
            .enrollments
            .delete_enrollment(enrollment_id, auth_user.id())
            .await?
        {
            info!(enrollment_id = %enrollment_id, "Enrollment deleted");
            return Ok(());
        }

        match state.enrollments.find_enrollment(enrollment_id).await? {
            None => Err(AppError::not_found(anyhow!("Enrollment not found"))),
            Some(_) => Err(deny(
                auth_user,
                "delete_enrollment",
                "Access denied. Only the enrolled student or the course instructor can remove this enrollment"
                    .to_string(),
            )),
        }
    }
}
