use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Enrollment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub student_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
}

/// Enrollment joined with its course, instructor and student names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EnrollmentDetail {
    pub id: Uuid,
    pub course_id: Uuid,
    pub student_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
    pub course_title: String,
    pub instructor_id: Uuid,
    pub instructor_name: Option<String>,
    pub student_name: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct NewEnrollment {
    pub course_id: Uuid,
    pub student_id: Uuid,
}

/// Which enrollments a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentFilter {
    Student(Uuid),
    Instructor(Uuid),
    Course(Uuid),
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEnrollmentRequest {
    #[validate(required(message = "course_id is required"))]
    pub course_id: Option<Uuid>,
    /// Defaults to the caller. When given it must be the caller's own id.
    pub student_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentCreatedResponse {
    pub message: String,
    pub enrollment: Enrollment,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentsResponse {
    pub enrollments: Vec<EnrollmentDetail>,
}
