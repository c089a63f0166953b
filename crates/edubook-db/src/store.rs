//! Store interfaces consumed by the HTTP layer.
//!
//! Handlers only ever see these traits through `Arc<dyn _>` handles, so the
//! same routes run against PostgreSQL in production and the in-memory store in
//! tests.

use async_trait::async_trait;
use edubook_core::StoreError;
use edubook_models::{
    Course, CourseChanges, CourseWithInstructor, Enrollment, EnrollmentDetail, EnrollmentFilter,
    Identity, NewCourse, NewEnrollment, NewProfile, Profile, ProfileChanges,
};
use uuid::Uuid;

/// Email/password identities. Sign-out is stateless and has no counterpart here.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Registers a new identity. A taken email is `StoreError::Rejected`.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, StoreError>;

    /// Checks a password. Unknown email and wrong password both yield
    /// `StoreError::InvalidCredentials`.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, StoreError>;

    async fn find_identity(&self, id: Uuid) -> Result<Option<Identity>, StoreError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn insert_profile(&self, profile: NewProfile) -> Result<Profile, StoreError>;

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError>;

    async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, StoreError>;

    /// Applies the present fields. `None` when no profile has this id.
    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Option<Profile>, StoreError>;
}

#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn insert_course(&self, course: NewCourse) -> Result<Course, StoreError>;

    /// Newest first, joined with the instructor's name.
    async fn list_courses(&self) -> Result<Vec<CourseWithInstructor>, StoreError>;

    async fn find_course(&self, id: Uuid) -> Result<Option<CourseWithInstructor>, StoreError>;

    /// Updates the course only if `owner` is its instructor. `None` means no row
    /// matched both conditions.
    async fn update_course(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: CourseChanges,
    ) -> Result<Option<Course>, StoreError>;

    /// Deletes the course (and its enrollments) only if `owner` is its instructor.
    async fn delete_course(&self, id: Uuid, owner: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// Inserts atomically. An existing pair is `StoreError::Conflict`, an unknown
    /// course or student is `StoreError::MissingReference`.
    async fn insert_enrollment(&self, enrollment: NewEnrollment)
    -> Result<Enrollment, StoreError>;

    async fn find_enrollment(&self, id: Uuid) -> Result<Option<Enrollment>, StoreError>;

    /// Newest first.
    async fn list_enrollments(
        &self,
        filter: EnrollmentFilter,
    ) -> Result<Vec<EnrollmentDetail>, StoreError>;

    /// Deletes only if `actor` is the enrolled student or the course's instructor.
    async fn delete_enrollment(&self, id: Uuid, actor: Uuid) -> Result<bool, StoreError>;
}

pub const EMAIL_TAKEN: &str = "User already registered";
pub const ALREADY_ENROLLED: &str = "User is already enrolled in this course";
pub const COURSE_NOT_FOUND: &str = "Course not found";
pub const STUDENT_NOT_FOUND: &str = "Student not found";
pub const INSTRUCTOR_NOT_FOUND: &str = "Instructor not found";

/// Emails are matched case-insensitively and without surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
        assert_eq!(normalize_email("bob@example.com"), "bob@example.com");
    }
}
