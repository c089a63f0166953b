//! Fills a store with fake instructors, students, courses and enrollments.

use edubook_core::{AppError, StoreError};
use edubook_db::{CourseStore, EnrollmentStore, IdentityProvider, ProfileStore};
use edubook_models::{NewCourse, NewEnrollment, UserRole};
use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Words};
use fake::faker::name::en::{FirstName, LastName};
use tracing::{info, instrument};
use uuid::Uuid;

use super::create_user;

/// Password shared by every seeded account.
pub const SEED_PASSWORD: &str = "password123";

#[derive(Debug, Clone, Copy)]
pub struct SeedConfig {
    pub instructors: usize,
    pub students: usize,
    pub courses_per_instructor: usize,
    pub enrollments_per_student: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub instructors: usize,
    pub students: usize,
    pub courses: usize,
    pub enrollments: usize,
}

async fn fake_user<S>(store: &S, role: UserRole) -> Result<Uuid, AppError>
where
    S: IdentityProvider + ProfileStore,
{
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let suffix = Uuid::new_v4().simple().to_string();
    let local_part: String = format!("{}{}", first_name, last_name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    let email = format!("{}.{}@edubook.test", local_part.to_lowercase(), &suffix[..8]);

    let user = create_user(
        store,
        &email,
        SEED_PASSWORD,
        &format!("{} {}", first_name, last_name),
        role,
    )
    .await?;

    Ok(user.id)
}

fn fake_title() -> String {
    let words: Vec<String> = Words(2..5).fake();
    let title = words.join(" ");
    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Untitled course".to_string(),
    }
}

#[instrument(skip(store))]
pub async fn seed<S>(store: &S, config: SeedConfig) -> Result<SeedSummary, AppError>
where
    S: IdentityProvider + ProfileStore + CourseStore + EnrollmentStore,
{
    let mut summary = SeedSummary::default();

    let mut course_ids = Vec::with_capacity(config.instructors * config.courses_per_instructor);
    for _ in 0..config.instructors {
        let instructor_id = fake_user(store, UserRole::Instructor).await?;
        summary.instructors += 1;

        for _ in 0..config.courses_per_instructor {
            let course = store
                .insert_course(NewCourse {
                    title: fake_title(),
                    description: Paragraph(2..4).fake(),
                    instructor_id,
                })
                .await?;
            course_ids.push(course.id);
            summary.courses += 1;
        }
    }

    let per_student = config.enrollments_per_student.min(course_ids.len());
    for index in 0..config.students {
        let student_id = fake_user(store, UserRole::Student).await?;
        summary.students += 1;

        for offset in 0..per_student {
            let course_id = course_ids[(index + offset) % course_ids.len()];
            match store
                .insert_enrollment(NewEnrollment {
                    course_id,
                    student_id,
                })
                .await
            {
                Ok(_) => summary.enrollments += 1,
                Err(StoreError::Conflict(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    info!(?summary, "Seeding complete");
    Ok(summary)
}
