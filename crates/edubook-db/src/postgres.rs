//! PostgreSQL-backed stores.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use edubook_core::{StoreError, hash_password, verify_password};
use edubook_models::{
    Course, CourseChanges, CourseWithInstructor, Enrollment, EnrollmentDetail, EnrollmentFilter,
    Identity, NewCourse, NewEnrollment, NewProfile, Profile, ProfileChanges,
};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use crate::store::{
    ALREADY_ENROLLED, COURSE_NOT_FOUND, CourseStore, EMAIL_TAKEN, EnrollmentStore,
    INSTRUCTOR_NOT_FOUND, IdentityProvider, ProfileStore, STUDENT_NOT_FOUND, normalize_email,
};

const COURSE_COLUMNS: &str = "id, title, description, instructor_id, created_at";

const COURSE_WITH_INSTRUCTOR_SELECT: &str = r#"SELECT
        c.id,
        c.title,
        c.description,
        c.instructor_id,
        p.full_name AS instructor_name,
        c.created_at
       FROM courses c
       LEFT JOIN profiles p ON p.id = c.instructor_id"#;

const ENROLLMENT_DETAIL_SELECT: &str = r#"SELECT
        e.id,
        e.course_id,
        e.student_id,
        e.enrolled_at,
        c.title AS course_title,
        c.instructor_id,
        ip.full_name AS instructor_name,
        sp.full_name AS student_name
       FROM enrollments e
       JOIN courses c ON c.id = e.course_id
       LEFT JOIN profiles ip ON ip.id = c.instructor_id
       LEFT JOIN profiles sp ON sp.id = e.student_id"#;

#[derive(Debug, FromRow)]
struct CredentialRow {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

fn internal(e: sqlx::Error) -> StoreError {
    StoreError::Internal(e.into())
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityProvider for PgStore {
    #[instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, StoreError> {
        let password_hash = hash_password(password).map_err(|e| StoreError::Internal(e.error))?;

        sqlx::query_as::<_, Identity>(
            r#"INSERT INTO users (email, password_hash)
               VALUES ($1, $2)
               RETURNING id, email, created_at"#,
        )
        .bind(normalize_email(email))
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return StoreError::Rejected(EMAIL_TAKEN.to_string());
            }
            internal(e)
        })
    }

    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, StoreError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)?
        .ok_or(StoreError::InvalidCredentials)?;

        let valid =
            verify_password(password, &row.password_hash).map_err(|e| StoreError::Internal(e.error))?;
        if !valid {
            return Err(StoreError::InvalidCredentials);
        }

        Ok(Identity {
            id: row.id,
            email: row.email,
            created_at: row.created_at,
        })
    }

    #[instrument(skip(self))]
    async fn find_identity(&self, id: Uuid) -> Result<Option<Identity>, StoreError> {
        sqlx::query_as::<_, Identity>("SELECT id, email, created_at FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal)
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    #[instrument(skip(self))]
    async fn insert_profile(&self, profile: NewProfile) -> Result<Profile, StoreError> {
        sqlx::query_as::<_, Profile>(
            r#"INSERT INTO profiles (id, full_name, role)
               VALUES ($1, $2, $3)
               RETURNING id, full_name, role, created_at"#,
        )
        .bind(profile.id)
        .bind(&profile.full_name)
        .bind(profile.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return StoreError::Conflict("Profile already exists".to_string());
                }
                if db_err.is_foreign_key_violation() {
                    return StoreError::MissingReference("User not found".to_string());
                }
            }
            internal(e)
        })
    }

    #[instrument(skip(self))]
    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        sqlx::query_as::<_, Profile>(
            "SELECT id, full_name, role, created_at FROM profiles ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(internal)
    }

    #[instrument(skip(self))]
    async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, StoreError> {
        sqlx::query_as::<_, Profile>(
            "SELECT id, full_name, role, created_at FROM profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)
    }

    #[instrument(skip(self))]
    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Option<Profile>, StoreError> {
        sqlx::query_as::<_, Profile>(
            r#"UPDATE profiles
               SET full_name = COALESCE($2, full_name),
                   role = COALESCE($3, role)
               WHERE id = $1
               RETURNING id, full_name, role, created_at"#,
        )
        .bind(id)
        .bind(changes.full_name)
        .bind(changes.role)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)
    }
}

#[async_trait]
impl CourseStore for PgStore {
    #[instrument(skip(self))]
    async fn insert_course(&self, course: NewCourse) -> Result<Course, StoreError> {
        sqlx::query_as::<_, Course>(&format!(
            r#"INSERT INTO courses (title, description, instructor_id)
               VALUES ($1, $2, $3)
               RETURNING {COURSE_COLUMNS}"#
        ))
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.instructor_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return StoreError::MissingReference(INSTRUCTOR_NOT_FOUND.to_string());
            }
            internal(e)
        })
    }

    #[instrument(skip(self))]
    async fn list_courses(&self) -> Result<Vec<CourseWithInstructor>, StoreError> {
        sqlx::query_as::<_, CourseWithInstructor>(&format!(
            "{COURSE_WITH_INSTRUCTOR_SELECT} ORDER BY c.created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(internal)
    }

    #[instrument(skip(self))]
    async fn find_course(&self, id: Uuid) -> Result<Option<CourseWithInstructor>, StoreError> {
        sqlx::query_as::<_, CourseWithInstructor>(&format!(
            "{COURSE_WITH_INSTRUCTOR_SELECT} WHERE c.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)
    }

    #[instrument(skip(self))]
    async fn update_course(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: CourseChanges,
    ) -> Result<Option<Course>, StoreError> {
        sqlx::query_as::<_, Course>(&format!(
            r#"UPDATE courses
               SET title = $3, description = $4
               WHERE id = $1 AND instructor_id = $2
               RETURNING {COURSE_COLUMNS}"#
        ))
        .bind(id)
        .bind(owner)
        .bind(&changes.title)
        .bind(&changes.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)
    }

    #[instrument(skip(self))]
    async fn delete_course(&self, id: Uuid, owner: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1 AND instructor_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(internal)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl EnrollmentStore for PgStore {
    #[instrument(skip(self))]
    async fn insert_enrollment(
        &self,
        enrollment: NewEnrollment,
    ) -> Result<Enrollment, StoreError> {
        sqlx::query_as::<_, Enrollment>(
            r#"INSERT INTO enrollments (course_id, student_id)
               VALUES ($1, $2)
               RETURNING id, course_id, student_id, enrolled_at"#,
        )
        .bind(enrollment.course_id)
        .bind(enrollment.student_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return StoreError::Conflict(ALREADY_ENROLLED.to_string());
                }
                if db_err.is_foreign_key_violation() {
                    let message = match db_err.constraint() {
                        Some(name) if name.contains("student") => STUDENT_NOT_FOUND,
                        _ => COURSE_NOT_FOUND,
                    };
                    return StoreError::MissingReference(message.to_string());
                }
            }
            internal(e)
        })
    }

    #[instrument(skip(self))]
    async fn find_enrollment(&self, id: Uuid) -> Result<Option<Enrollment>, StoreError> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT id, course_id, student_id, enrolled_at FROM enrollments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)
    }

    #[instrument(skip(self))]
    async fn list_enrollments(
        &self,
        filter: EnrollmentFilter,
    ) -> Result<Vec<EnrollmentDetail>, StoreError> {
        let (predicate, id) = match filter {
            EnrollmentFilter::Student(id) => ("e.student_id = $1", id),
            EnrollmentFilter::Instructor(id) => ("c.instructor_id = $1", id),
            EnrollmentFilter::Course(id) => ("e.course_id = $1", id),
        };

        sqlx::query_as::<_, EnrollmentDetail>(&format!(
            "{ENROLLMENT_DETAIL_SELECT} WHERE {predicate} ORDER BY e.enrolled_at DESC"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(internal)
    }

    #[instrument(skip(self))]
    async fn delete_enrollment(&self, id: Uuid, actor: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"DELETE FROM enrollments
               WHERE id = $1
                 AND (student_id = $2
                      OR course_id IN (SELECT id FROM courses WHERE instructor_id = $2))"#,
        )
        .bind(id)
        .bind(actor)
        .execute(&self.pool)
        .await
        .map_err(internal)?;

        Ok(result.rows_affected() > 0)
    }
}
