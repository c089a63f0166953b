//! In-memory stores with the same contracts as [`crate::PgStore`].
//!
//! All state sits behind one `tokio::sync::RwLock`; every write, including the
//! enrollment uniqueness check, happens under a single write guard.

use async_trait::async_trait;
use chrono::Utc;
use edubook_core::{StoreError, hash_password_with_cost, verify_password};
use edubook_models::{
    Course, CourseChanges, CourseWithInstructor, Enrollment, EnrollmentDetail, EnrollmentFilter,
    Identity, NewCourse, NewEnrollment, NewProfile, Profile, ProfileChanges,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{
    ALREADY_ENROLLED, COURSE_NOT_FOUND, CourseStore, EMAIL_TAKEN, EnrollmentStore,
    INSTRUCTOR_NOT_FOUND, IdentityProvider, ProfileStore, STUDENT_NOT_FOUND, normalize_email,
};

/// bcrypt's minimum work factor. Keeps test signups fast.
const HASH_COST: u32 = 4;

#[derive(Debug, Clone)]
struct UserRecord {
    identity: Identity,
    password_hash: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<UserRecord>,
    profiles: Vec<Profile>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
}

impl MemoryState {
    fn profile_name(&self, id: Uuid) -> Option<String> {
        self.profiles
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.full_name.clone())
    }

    fn with_instructor(&self, course: &Course) -> CourseWithInstructor {
        CourseWithInstructor {
            id: course.id,
            title: course.title.clone(),
            description: course.description.clone(),
            instructor_id: course.instructor_id,
            instructor_name: self.profile_name(course.instructor_id),
            created_at: course.created_at,
        }
    }

    fn detail(&self, enrollment: &Enrollment) -> Option<EnrollmentDetail> {
        let course = self.courses.iter().find(|c| c.id == enrollment.course_id)?;
        Some(EnrollmentDetail {
            id: enrollment.id,
            course_id: enrollment.course_id,
            student_id: enrollment.student_id,
            enrolled_at: enrollment.enrolled_at,
            course_title: course.title.clone(),
            instructor_id: course.instructor_id,
            instructor_name: self.profile_name(course.instructor_id),
            student_name: self.profile_name(enrollment.student_id),
        })
    }

    fn instructs(&self, course_id: Uuid, instructor_id: Uuid) -> bool {
        self.courses
            .iter()
            .any(|c| c.id == course_id && c.instructor_id == instructor_id)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityProvider for MemoryStore {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, StoreError> {
        let email = normalize_email(email);
        let password_hash =
            hash_password_with_cost(password, HASH_COST).map_err(|e| StoreError::Internal(e.error))?;

        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.identity.email == email) {
            return Err(StoreError::Rejected(EMAIL_TAKEN.to_string()));
        }

        let identity = Identity {
            id: Uuid::new_v4(),
            email,
            created_at: Utc::now(),
        };
        state.users.push(UserRecord {
            identity: identity.clone(),
            password_hash,
        });

        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, StoreError> {
        let email = normalize_email(email);
        let record = {
            let state = self.state.read().await;
            state
                .users
                .iter()
                .find(|u| u.identity.email == email)
                .cloned()
                .ok_or(StoreError::InvalidCredentials)?
        };

        let valid = verify_password(password, &record.password_hash)
            .map_err(|e| StoreError::Internal(e.error))?;
        if !valid {
            return Err(StoreError::InvalidCredentials);
        }

        Ok(record.identity)
    }

    async fn find_identity(&self, id: Uuid) -> Result<Option<Identity>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.identity.id == id)
            .map(|u| u.identity.clone()))
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn insert_profile(&self, profile: NewProfile) -> Result<Profile, StoreError> {
        let mut state = self.state.write().await;
        if !state.users.iter().any(|u| u.identity.id == profile.id) {
            return Err(StoreError::MissingReference("User not found".to_string()));
        }
        if state.profiles.iter().any(|p| p.id == profile.id) {
            return Err(StoreError::Conflict("Profile already exists".to_string()));
        }

        let profile = Profile {
            id: profile.id,
            full_name: profile.full_name,
            role: profile.role,
            created_at: Utc::now(),
        };
        state.profiles.push(profile.clone());

        Ok(profile)
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        Ok(self.state.read().await.profiles.clone())
    }

    async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, StoreError> {
        let state = self.state.read().await;
        Ok(state.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Option<Profile>, StoreError> {
        let mut state = self.state.write().await;
        let Some(profile) = state.profiles.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        if let Some(full_name) = changes.full_name {
            profile.full_name = full_name;
        }
        if let Some(role) = changes.role {
            profile.role = role;
        }

        Ok(Some(profile.clone()))
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn insert_course(&self, course: NewCourse) -> Result<Course, StoreError> {
        let mut state = self.state.write().await;
        if !state
            .users
            .iter()
            .any(|u| u.identity.id == course.instructor_id)
        {
            return Err(StoreError::MissingReference(
                INSTRUCTOR_NOT_FOUND.to_string(),
            ));
        }

        let course = Course {
            id: Uuid::new_v4(),
            title: course.title,
            description: course.description,
            instructor_id: course.instructor_id,
            created_at: Utc::now(),
        };
        state.courses.push(course.clone());

        Ok(course)
    }

    async fn list_courses(&self) -> Result<Vec<CourseWithInstructor>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .courses
            .iter()
            .rev()
            .map(|c| state.with_instructor(c))
            .collect())
    }

    async fn find_course(&self, id: Uuid) -> Result<Option<CourseWithInstructor>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .courses
            .iter()
            .find(|c| c.id == id)
            .map(|c| state.with_instructor(c)))
    }

    async fn update_course(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: CourseChanges,
    ) -> Result<Option<Course>, StoreError> {
        let mut state = self.state.write().await;
        let Some(course) = state
            .courses
            .iter_mut()
            .find(|c| c.id == id && c.instructor_id == owner)
        else {
            return Ok(None);
        };

        course.title = changes.title;
        course.description = changes.description;

        Ok(Some(course.clone()))
    }

    async fn delete_course(&self, id: Uuid, owner: Uuid) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let before = state.courses.len();
        state
            .courses
            .retain(|c| !(c.id == id && c.instructor_id == owner));
        if state.courses.len() == before {
            return Ok(false);
        }

        state.enrollments.retain(|e| e.course_id != id);
        Ok(true)
    }
}

#[async_trait]
impl EnrollmentStore for MemoryStore {
    async fn insert_enrollment(
        &self,
        enrollment: NewEnrollment,
    ) -> Result<Enrollment, StoreError> {
        let mut state = self.state.write().await;
        if !state.courses.iter().any(|c| c.id == enrollment.course_id) {
            return Err(StoreError::MissingReference(COURSE_NOT_FOUND.to_string()));
        }
        if !state
            .users
            .iter()
            .any(|u| u.identity.id == enrollment.student_id)
        {
            return Err(StoreError::MissingReference(STUDENT_NOT_FOUND.to_string()));
        }
        if state.enrollments.iter().any(|e| {
            e.course_id == enrollment.course_id && e.student_id == enrollment.student_id
        }) {
            return Err(StoreError::Conflict(ALREADY_ENROLLED.to_string()));
        }

        let enrollment = Enrollment {
            id: Uuid::new_v4(),
            course_id: enrollment.course_id,
            student_id: enrollment.student_id,
            enrolled_at: Utc::now(),
        };
        state.enrollments.push(enrollment.clone());

        Ok(enrollment)
    }

    async fn find_enrollment(&self, id: Uuid) -> Result<Option<Enrollment>, StoreError> {
        let state = self.state.read().await;
        Ok(state.enrollments.iter().find(|e| e.id == id).cloned())
    }

    async fn list_enrollments(
        &self,
        filter: EnrollmentFilter,
    ) -> Result<Vec<EnrollmentDetail>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .enrollments
            .iter()
            .rev()
            .filter_map(|e| state.detail(e))
            .filter(|d| match filter {
                EnrollmentFilter::Student(id) => d.student_id == id,
                EnrollmentFilter::Instructor(id) => d.instructor_id == id,
                EnrollmentFilter::Course(id) => d.course_id == id,
            })
            .collect())
    }

    async fn delete_enrollment(&self, id: Uuid, actor: Uuid) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let Some(index) = state.enrollments.iter().position(|e| {
            e.id == id && (e.student_id == actor || state.instructs(e.course_id, actor))
        }) else {
            return Ok(false);
        };

        state.enrollments.remove(index);
        Ok(true)
    }
}
