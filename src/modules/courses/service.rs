use anyhow::anyhow;
use edubook_core::AppError;
use edubook_models::{
    Course, CourseChanges, CourseWithInstructor, CreateCourseRequest, NewCourse,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::ensure_owner;
use crate::state::AppState;

const COURSE_NOT_FOUND: &str = "Course not found";

pub struct CourseService;

impl CourseService {
    /// Creates a course owned by the calling instructor.
    #[instrument(skip(state, dto), fields(title = %dto.title))]
    pub async fn create_course(
        state: &AppState,
        auth_user: &AuthUser,
        dto: CreateCourseRequest,
    ) -> Result<Course, AppError> {
        let instructor_id = dto.instructor_id.unwrap_or(auth_user.id());
        ensure_owner(auth_user, instructor_id, "create_course")?;

        let course = state
            .courses
            .insert_course(NewCourse {
                title: dto.title,
                description: dto.description,
                instructor_id,
            })
            .await?;

        info!(course_id = %course.id, "Course created");
        Ok(course)
    }

    #[instrument(skip(state))]
    pub async fn list_courses(state: &AppState) -> Result<Vec<CourseWithInstructor>, AppError> {
        Ok(state.courses.list_courses().await?)
    }

    #[instrument(skip(state))]
    pub async fn get_course(
        state: &AppState,
        course_id: Uuid,
    ) -> Result<CourseWithInstructor, AppError> {
        state
            .courses
            .find_course(course_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!(COURSE_NOT_FOUND)))
    }

    /// Updates the course if the caller is its instructor. A miss is classified
    /// as 404 (no such course) or 403 (someone else's course).
    #[instrument(skip(state, changes))]
    pub async fn update_course(
        state: &AppState,
        auth_user: &AuthUser,
        course_id: Uuid,
        changes: CourseChanges,
    ) -> Result<Course, AppError> {
        if let Some(course) = state
            .courses
            .update_course(course_id, auth_user.id(), changes)
            .await?
        {
            info!(course_id = %course.id, "Course updated");
            return Ok(course);
        }

        Err(Self::classify_miss(state, auth_user, course_id, "update_course").await)
    }

    #[instrument(skip(state))]
    pub async fn delete_course(
        state: &AppState,
        auth_user: &AuthUser,
        course_id: Uuid,
    ) -> Result<(), AppError> {
        if state
            .courses
            .delete_course(course_id, auth_user.id())
            .await?
        {
            info!(course_id = %course_id, "Course deleted");
            return Ok(());
        }

        Err(Self::classify_miss(state, auth_user, course_id, "delete_course").await)
    }

    async fn classify_miss(
        state: &AppState,
        auth_user: &AuthUser,
        course_id: Uuid,
        action: &'static str,
    ) -> AppError {
        match state.courses.find_course(course_id).await {
            Ok(None) => AppError::not_found(anyhow!(COURSE_NOT_FOUND)),
            Ok(Some(course)) => match ensure_owner(auth_user, course.instructor_id, action) {
                Err(denied) => denied,
                // Lost a race with a concurrent write.
                Ok(()) => AppError::not_found(anyhow!(COURSE_NOT_FOUND)),
            },
            Err(e) => e.into(),
        }
    }
}
