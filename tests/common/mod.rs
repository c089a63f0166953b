#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use chrono::Utc;
use edubook::router::init_router;
use edubook::state::AppState;
use edubook_auth::Claims;
use edubook_config::{CorsConfig, JwtConfig};
use edubook_db::MemoryStore;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";
pub const TEST_PASSWORD: &str = "testpass123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        token_expiry: 604_800,
        cookie_name: "jwt".to_string(),
        cookie_secure: true,
    }
}

pub fn test_cors_config() -> CorsConfig {
    CorsConfig {
        allowed_origins: vec!["http://localhost:3000".to_string()],
    }
}

pub fn setup_test_app_with(jwt_config: JwtConfig) -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()), jwt_config, test_cors_config());
    init_router(state)
}

pub fn setup_test_app() -> Router {
    setup_test_app_with(test_jwt_config())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
    pub body: Value,
}

impl TestResponse {
    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .map(|value| value.to_str().unwrap().to_string())
    }

    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

pub fn json_request(method: &str, uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8_lossy(&bytes).to_string();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        text,
        body,
    }
}

/// The `name=value` pair of a `Set-Cookie` header, ready to send back as `Cookie`.
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().trim().to_string()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub cookie: String,
}

pub async fn signup(app: &Router, role: &str) -> TestUser {
    let email = generate_unique_email();
    let response = send(
        app,
        json_request(
            "POST",
            "/auth/signup",
            json!({
                "email": email,
                "password": TEST_PASSWORD,
                "full_name": format!("Test {}", role),
                "role": role,
            }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);

    let id = response.body["user"]["id"].as_str().unwrap().parse().unwrap();
    let cookie = cookie_pair(&response.set_cookie().unwrap());

    TestUser {
        id,
        email,
        password: TEST_PASSWORD.to_string(),
        cookie,
    }
}

pub async fn login(app: &Router, email: &str, password: &str) -> TestResponse {
    send(
        app,
        json_request(
            "POST",
            "/auth/login",
            json!({ "email": email, "password": password }),
            None,
        ),
    )
    .await
}

pub async fn create_course(app: &Router, instructor: &TestUser, title: &str) -> Uuid {
    let response = send(
        app,
        json_request(
            "POST",
            "/courses",
            json!({ "title": title, "description": "A test course" }),
            Some(&instructor.cookie),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);

    response.body["course"]["id"].as_str().unwrap().parse().unwrap()
}

pub async fn enroll(app: &Router, student: &TestUser, course_id: Uuid) -> TestResponse {
    send(
        app,
        json_request(
            "POST",
            "/enrollments",
            json!({ "course_id": course_id }),
            Some(&student.cookie),
        ),
    )
    .await
}

/// Claims for `user_id` expiring `ttl_secs` from now; negative values are already expired.
pub fn claims_for(user_id: Uuid, ttl_secs: i64) -> Claims {
    let now = Utc::now().timestamp();
    Claims {
        sub: user_id.to_string(),
        iat: now as usize,
        exp: (now + ttl_secs) as usize,
    }
}
