mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_profiles_are_publicly_readable() {
    let app = setup_test_app();
    let instructor = signup(&app, "instructor").await;
    let student = signup(&app, "student").await;

    let response = send(&app, empty_request("GET", "/profiles", None)).await;
    assert_eq!(response.status, StatusCode::OK);
    let profiles = response.body["profiles"].as_array().unwrap();
    assert_eq!(profiles.len(), 2);
    assert!(profiles.iter().any(|p| p["id"] == instructor.id.to_string()));
    assert!(profiles.iter().any(|p| p["id"] == student.id.to_string()));

    let response = send(
        &app,
        empty_request("GET", &format!("/profiles/{}", student.id), None),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["profile"]["full_name"], "Test student");
    assert_eq!(response.body["profile"]["role"], "student");
    assert!(response.body["profile"].get("email").is_none());
}

#[tokio::test]
async fn test_get_unknown_profile() {
    let app = setup_test_app();

    let response = send(
        &app,
        empty_request("GET", &format!("/profiles/{}", Uuid::new_v4()), None),
    )
    .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "Profile not found");
}

#[tokio::test]
async fn test_update_own_profile() {
    let app = setup_test_app();
    let student = signup(&app, "student").await;

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/profiles/{}", student.id),
            json!({ "full_name": "Grace Hopper" }),
            Some(&student.cookie),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Profile updated successfully");
    assert_eq!(response.body["profile"]["full_name"], "Grace Hopper");
    assert_eq!(response.body["profile"]["role"], "student");

    let response = send(&app, empty_request("GET", "/auth/me", Some(&student.cookie))).await;
    assert_eq!(response.body["user"]["full_name"], "Grace Hopper");
}

#[tokio::test]
async fn test_role_change_applies_to_existing_session() {
    let app = setup_test_app();
    let user = signup(&app, "student").await;

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/profiles/{}", user.id),
            json!({ "role": "instructor" }),
            Some(&user.cookie),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["profile"]["role"], "instructor");

    // Same cookie, no re-login: the role is resolved on every request.
    create_course(&app, &user, "Career Change").await;
}

#[tokio::test]
async fn test_update_other_profile_is_forbidden() {
    let app = setup_test_app();
    let alice = signup(&app, "student").await;
    let bob = signup(&app, "student").await;

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/profiles/{}", bob.id),
            json!({ "full_name": "Hijacked" }),
            Some(&alice.cookie),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = send(
        &app,
        empty_request("GET", &format!("/profiles/{}", bob.id), None),
    )
    .await;
    assert_eq!(response.body["profile"]["full_name"], "Test student");
}

#[tokio::test]
async fn test_update_profile_requires_auth() {
    let app = setup_test_app();
    let student = signup(&app, "student").await;

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/profiles/{}", student.id),
            json!({ "full_name": "Anonymous" }),
            None,
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile_rejects_blank_full_name() {
    let app = setup_test_app();
    let student = signup(&app, "student").await;

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/profiles/{}", student.id),
            json!({ "full_name": "   " }),
            Some(&student.cookie),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "full_name must not be empty");

    let response = send(
        &app,
        empty_request("GET", &format!("/profiles/{}", student.id), None),
    )
    .await;
    assert_eq!(response.body["profile"]["full_name"], "Test student");
}

#[tokio::test]
async fn test_update_profile_rejects_invalid_role() {
    let app = setup_test_app();
    let student = signup(&app, "student").await;

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/profiles/{}", student.id),
            json!({ "role": "admin" }),
            Some(&student.cookie),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
