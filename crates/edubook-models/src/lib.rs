//! # EduBook Models
//!
//! Domain models and request/response DTOs for the EduBook API.
//!
//! # Modules
//!
//! - [`roles`]: the [`UserRole`] enum shared by profiles and principals
//! - [`auth`]: identities, the request-scoped [`Principal`], signup/login DTOs
//! - [`profiles`]: user profiles
//! - [`courses`]: courses and their instructor-joined read view
//! - [`enrollments`]: enrollments and their joined read view
//! - [`text`]: whitespace-trimming deserializers for free-text fields
//!
//! Request DTOs derive [`validator::Validate`]; every text field defaults to empty
//! when absent so a single validation pass reports all missing fields at once.

pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod profiles;
pub mod roles;
pub mod text;

pub use auth::{
    Identity, LoginRequest, LoginResponse, MeResponse, MessageResponse, Principal,
    SignupRequest, SignupResponse, UserResponse,
};
pub use courses::{
    Course, CourseChanges, CourseMutationResponse, CourseResponse, CourseWithInstructor,
    CoursesResponse, CreateCourseRequest, NewCourse, UpdateCourseRequest,
};
pub use enrollments::{
    CreateEnrollmentRequest, Enrollment, EnrollmentCreatedResponse, EnrollmentDetail,
    EnrollmentFilter, EnrollmentsResponse, NewEnrollment,
};
pub use profiles::{
    NewProfile, Profile, ProfileChanges, ProfileResponse, ProfileUpdatedResponse,
    ProfilesResponse, UpdateProfileRequest,
};
pub use roles::{UserRole, validate_role};
