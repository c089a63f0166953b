use edubook_config::jwt::DEFAULT_COOKIE_NAME;
use edubook_models::{
    Course, CourseMutationResponse, CourseResponse, CourseWithInstructor, CoursesResponse,
    CreateCourseRequest, CreateEnrollmentRequest, Enrollment, EnrollmentCreatedResponse,
    EnrollmentDetail, EnrollmentsResponse, LoginRequest, LoginResponse, MeResponse,
    MessageResponse, Profile, ProfileResponse, ProfileUpdatedResponse, ProfilesResponse,
    SignupRequest, SignupResponse, UpdateCourseRequest, UpdateProfileRequest, UserResponse,
    UserRole,
};
use serde::Serialize;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::me,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::enrollments::controller::create_enrollment,
        crate::modules::enrollments::controller::get_enrollments,
        crate::modules::enrollments::controller::get_student_enrollments,
        crate::modules::enrollments::controller::get_instructor_enrollments,
        crate::modules::enrollments::controller::get_course_enrollments,
        crate::modules::enrollments::controller::delete_enrollment,
        crate::modules::profiles::controller::get_profiles,
        crate::modules::profiles::controller::get_profile,
        crate::modules::profiles::controller::update_profile,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            SignupRequest,
            SignupResponse,
            LoginRequest,
            LoginResponse,
            MeResponse,
            MessageResponse,
            ErrorResponse,
            Course,
            CourseWithInstructor,
            CreateCourseRequest,
            UpdateCourseRequest,
            CoursesResponse,
            CourseResponse,
            CourseMutationResponse,
            Enrollment,
            EnrollmentDetail,
            CreateEnrollmentRequest,
            EnrollmentCreatedResponse,
            EnrollmentsResponse,
            Profile,
            UpdateProfileRequest,
            ProfilesResponse,
            ProfileResponse,
            ProfileUpdatedResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup, login and session cookie handling"),
        (name = "Courses", description = "Course catalogue managed by instructors"),
        (name = "Enrollments", description = "Student enrollments in courses"),
        (name = "Profiles", description = "User profiles")
    ),
    info(
        title = "EduBook API",
        version = "0.1.0",
        description = "Course booking API: instructors publish courses, students enroll. Authentication uses an HttpOnly JWT cookie.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(DEFAULT_COOKIE_NAME))),
            )
        }
    }
}
