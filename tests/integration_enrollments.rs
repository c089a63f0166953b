mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_instructor_publishes_and_student_enrolls() {
    let app = setup_test_app();
    let instructor = signup(&app, "instructor").await;
    let student = signup(&app, "student").await;

    // Instructor signs in fresh, creates a course, then signs out.
    let session = login(&app, &instructor.email, &instructor.password).await;
    assert_eq!(session.status, StatusCode::OK);
    let instructor_cookie = cookie_pair(&session.set_cookie().unwrap());

    let response = send(
        &app,
        json_request(
            "POST",
            "/courses",
            json!({ "title": "Distributed Systems", "description": "Consensus" }),
            Some(&instructor_cookie),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let course_id = response.body["course"]["id"].as_str().unwrap().to_string();

    let response = send(&app, empty_request("POST", "/auth/logout", None)).await;
    assert_eq!(response.status, StatusCode::OK);

    // Student signs in and finds the course in the public listing.
    let session = login(&app, &student.email, &student.password).await;
    assert_eq!(session.status, StatusCode::OK);
    let student_cookie = cookie_pair(&session.set_cookie().unwrap());

    let listed = send(&app, empty_request("GET", "/courses", None)).await;
    let courses = listed.body["courses"].as_array().unwrap();
    assert!(courses.iter().any(|c| c["id"] == course_id.as_str()));

    let enroll_request = || {
        json_request(
            "POST",
            "/enrollments",
            json!({ "course_id": course_id }),
            Some(&student_cookie),
        )
    };

    let response = send(&app, enroll_request()).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "Enrolled successfully");
    assert_eq!(response.body["enrollment"]["course_id"], course_id.as_str());
    assert_eq!(
        response.body["enrollment"]["student_id"],
        student.id.to_string()
    );

    let response = send(&app, enroll_request()).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "User is already enrolled in this course");
}

#[tokio::test]
async fn test_enrollment_requires_auth() {
    let app = setup_test_app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/enrollments",
            json!({ "course_id": Uuid::new_v4() }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = send(&app, empty_request("GET", "/enrollments", None)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        empty_request("DELETE", &format!("/enrollments/{}", Uuid::new_v4()), None),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_instructor_cannot_enroll() {
    let app = setup_test_app();
    let instructor = signup(&app, "instructor").await;
    let course_id = create_course(&app, &instructor, "Rust 101").await;

    let response = enroll(&app, &instructor, course_id).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(response.error().contains("student"));
}

#[tokio::test]
async fn test_enroll_unknown_course() {
    let app = setup_test_app();
    let student = signup(&app, "student").await;

    let response = enroll(&app, &student, Uuid::new_v4()).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_enroll_missing_course_id() {
    let app = setup_test_app();
    let student = signup(&app, "student").await;

    let response = send(
        &app,
        json_request("POST", "/enrollments", json!({}), Some(&student.cookie)),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "course_id is required");
}

#[tokio::test]
async fn test_enroll_on_behalf_of_other_student_is_forbidden() {
    let app = setup_test_app();
    let instructor = signup(&app, "instructor").await;
    let student = signup(&app, "student").await;
    let other = signup(&app, "student").await;
    let course_id = create_course(&app, &instructor, "Rust 101").await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/enrollments",
            json!({ "course_id": course_id, "student_id": other.id }),
            Some(&student.cookie),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = send(&app, empty_request("GET", "/enrollments", Some(&other.cookie))).await;
    assert_eq!(response.body["enrollments"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_concurrent_enrollments_admit_exactly_one() {
    let app = setup_test_app();
    let instructor = signup(&app, "instructor").await;
    let student = signup(&app, "student").await;
    let course_id = create_course(&app, &instructor, "Rust 101").await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        let request = json_request(
            "POST",
            "/enrollments",
            json!({ "course_id": course_id }),
            Some(&student.cookie),
        );
        handles.push(tokio::spawn(async move { send(&app, request).await.status }));
    }

    let mut created = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::BAD_REQUEST => rejected += 1,
            other => panic!("unexpected status {}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(rejected, 7);
}

#[tokio::test]
async fn test_list_enrollments_is_scoped_to_caller() {
    let app = setup_test_app();
    let instructor = signup(&app, "instructor").await;
    let other_instructor = signup(&app, "instructor").await;
    let alice = signup(&app, "student").await;
    let bob = signup(&app, "student").await;

    let rust = create_course(&app, &instructor, "Rust 101").await;
    let go = create_course(&app, &other_instructor, "Go 101").await;

    assert_eq!(enroll(&app, &alice, rust).await.status, StatusCode::CREATED);
    assert_eq!(enroll(&app, &alice, go).await.status, StatusCode::CREATED);
    assert_eq!(enroll(&app, &bob, rust).await.status, StatusCode::CREATED);

    let response = send(&app, empty_request("GET", "/enrollments", Some(&alice.cookie))).await;
    assert_eq!(response.status, StatusCode::OK);
    let enrollments = response.body["enrollments"].as_array().unwrap();
    assert_eq!(enrollments.len(), 2);
    assert!(enrollments
        .iter()
        .all(|e| e["student_id"] == alice.id.to_string()));

    let response = send(
        &app,
        empty_request("GET", "/enrollments", Some(&instructor.cookie)),
    )
    .await;
    let enrollments = response.body["enrollments"].as_array().unwrap();
    assert_eq!(enrollments.len(), 2);
    assert!(enrollments.iter().all(|e| e["course_id"] == rust.to_string()));
    assert!(enrollments.iter().all(|e| e["course_title"] == "Rust 101"));
}

#[tokio::test]
async fn test_student_enrollments_are_private() {
    let app = setup_test_app();
    let instructor = signup(&app, "instructor").await;
    let alice = signup(&app, "student").await;
    let bob = signup(&app, "student").await;
    let course_id = create_course(&app, &instructor, "Rust 101").await;
    enroll(&app, &alice, course_id).await;

    let uri = format!("/enrollments/student/{}", alice.id);

    let response = send(&app, empty_request("GET", &uri, Some(&alice.cookie))).await;
    assert_eq!(response.status, StatusCode::OK);
    let enrollments = response.body["enrollments"].as_array().unwrap();
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0]["student_name"], "Test student");
    assert_eq!(enrollments[0]["instructor_name"], "Test instructor");

    let response = send(&app, empty_request("GET", &uri, Some(&bob.cookie))).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = send(&app, empty_request("GET", &uri, Some(&instructor.cookie))).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_instructor_enrollments_are_private() {
    let app = setup_test_app();
    let instructor = signup(&app, "instructor").await;
    let other = signup(&app, "instructor").await;
    let student = signup(&app, "student").await;
    let course_id = create_course(&app, &instructor, "Rust 101").await;
    enroll(&app, &student, course_id).await;

    let uri = format!("/enrollments/instructor/{}", instructor.id);

    let response = send(&app, empty_request("GET", &uri, Some(&instructor.cookie))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["enrollments"].as_array().unwrap().len(), 1);

    let response = send(&app, empty_request("GET", &uri, Some(&other.cookie))).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_course_enrollments_visible_to_course_instructor() {
    let app = setup_test_app();
    let instructor = signup(&app, "instructor").await;
    let other = signup(&app, "instructor").await;
    let student = signup(&app, "student").await;
    let course_id = create_course(&app, &instructor, "Rust 101").await;
    enroll(&app, &student, course_id).await;

    let uri = format!("/enrollments/course/{}", course_id);

    let response = send(&app, empty_request("GET", &uri, Some(&instructor.cookie))).await;
    assert_eq!(response.status, StatusCode::OK);
    let enrollments = response.body["enrollments"].as_array().unwrap();
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0]["student_id"], student.id.to_string());

    let response = send(&app, empty_request("GET", &uri, Some(&other.cookie))).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = send(&app, empty_request("GET", &uri, Some(&student.cookie))).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = send(
        &app,
        empty_request(
            "GET",
            &format!("/enrollments/course/{}", Uuid::new_v4()),
            Some(&instructor.cookie),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_student_withdraws_enrollment() {
    let app = setup_test_app();
    let instructor = signup(&app, "instructor").await;
    let student = signup(&app, "student").await;
    let stranger = signup(&app, "student").await;
    let course_id = create_course(&app, &instructor, "Rust 101").await;

    let response = enroll(&app, &student, course_id).await;
    let enrollment_id = response.body["enrollment"]["id"].as_str().unwrap().to_string();
    let uri = format!("/enrollments/{}", enrollment_id);

    let response = send(&app, empty_request("DELETE", &uri, Some(&stranger.cookie))).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = send(&app, empty_request("DELETE", &uri, Some(&student.cookie))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Enrollment deleted successfully");

    let response = send(&app, empty_request("DELETE", &uri, Some(&student.cookie))).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "Enrollment not found");

    // Withdrawing frees the slot for a fresh enrollment.
    assert_eq!(
        enroll(&app, &student, course_id).await.status,
        StatusCode::CREATED
    );
}

#[tokio::test]
async fn test_course_instructor_removes_enrollment() {
    let app = setup_test_app();
    let instructor = signup(&app, "instructor").await;
    let other = signup(&app, "instructor").await;
    let student = signup(&app, "student").await;
    let course_id = create_course(&app, &instructor, "Rust 101").await;

    let response = enroll(&app, &student, course_id).await;
    let uri = format!(
        "/enrollments/{}",
        response.body["enrollment"]["id"].as_str().unwrap()
    );

    let response = send(&app, empty_request("DELETE", &uri, Some(&other.cookie))).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = send(&app, empty_request("DELETE", &uri, Some(&instructor.cookie))).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = send(&app, empty_request("GET", "/enrollments", Some(&student.cookie))).await;
    assert_eq!(response.body["enrollments"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_deleting_course_removes_its_enrollments() {
    let app = setup_test_app();
    let instructor = signup(&app, "instructor").await;
    let student = signup(&app, "student").await;
    let course_id = create_course(&app, &instructor, "Rust 101").await;
    enroll(&app, &student, course_id).await;

    let response = send(
        &app,
        empty_request(
            "DELETE",
            &format!("/courses/{}", course_id),
            Some(&instructor.cookie),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = send(&app, empty_request("GET", "/enrollments", Some(&student.cookie))).await;
    assert_eq!(response.body["enrollments"].as_array().unwrap().len(), 0);
}
