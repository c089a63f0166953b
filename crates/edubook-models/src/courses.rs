use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub instructor_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Course joined with its instructor's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourseWithInstructor {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub instructor_id: Uuid,
    pub instructor_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub instructor_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct CourseChanges {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseRequest {
    #[serde(default, deserialize_with = "crate::text::deserialize_trimmed")]
    #[validate(length(min = 1, max = 200, message = "title is required (max 200 characters)"))]
    pub title: String,
    #[serde(default, deserialize_with = "crate::text::deserialize_trimmed")]
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    /// Defaults to the caller. When given it must be the caller's own id.
    pub instructor_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseRequest {
    #[serde(default, deserialize_with = "crate::text::deserialize_trimmed")]
    #[validate(length(min = 1, max = 200, message = "title is required (max 200 characters)"))]
    pub title: String,
    #[serde(default, deserialize_with = "crate::text::deserialize_trimmed")]
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
}

impl From<UpdateCourseRequest> for CourseChanges {
    fn from(dto: UpdateCourseRequest) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CoursesResponse {
    pub courses: Vec<CourseWithInstructor>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub course: CourseWithInstructor,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseMutationResponse {
    pub message: String,
    pub course: Course,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_course_request_reports_both_fields() {
        let dto: CreateCourseRequest = serde_json::from_str("{}").unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn test_create_course_request_instructor_optional() {
        let dto: CreateCourseRequest =
            serde_json::from_str(r#"{"title":"Rust 101","description":"Ownership"}"#).unwrap();
        assert!(dto.validate().is_ok());
        assert!(dto.instructor_id.is_none());
    }

    #[test]
    fn test_course_requests_reject_blank_text() {
        let dto: CreateCourseRequest =
            serde_json::from_str(r#"{"title":"   ","description":"\t\n"}"#).unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("description"));

        let dto: UpdateCourseRequest =
            serde_json::from_str(r#"{"title":"  ","description":"Lifetimes"}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_course_request_trims_title() {
        let dto: CreateCourseRequest =
            serde_json::from_str(r#"{"title":"  Rust 101 ","description":"Ownership"}"#).unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.title, "Rust 101");
    }

    #[test]
    fn test_update_course_request_rejects_long_title() {
        let long_title = "x".repeat(201);
        let dto = UpdateCourseRequest {
            title: long_title,
            description: "ok".to_string(),
        };
        assert!(dto.validate().is_err());
    }
}
