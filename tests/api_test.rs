use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use placement_portal::{
    config::Config, database::memory::MemoryStore, routes::build_router, AppState,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        database_url: None,
        jwt_secret: "test_secret_key".into(),
        session_ttl_minutes: 60,
        public_rps: 100,
        api_rps: 100,
        require_job_deadline: true,
        employer_live_stats: true,
    }
}

fn setup_app() -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()), test_config());
    build_router(state)
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn register(app: &Router, email: &str, role: &str) {
    let (status, body) = call(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Palesa",
            "surname": "Mabaso",
            "email": email,
            "password": "abc12!",
            "confirmPassword": "abc12!",
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
}

async fn login(app: &Router, email: &str) -> JsonValue {
    let (status, body) = call(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": email, "password": "abc12!"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body
}

#[tokio::test]
async fn candidate_session_end_to_end() {
    let app = setup_app();
    register(&app, "palesa@example.com", "Candidate").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Other",
            "surname": "Person",
            "email": "Palesa@Example.com",
            "password": "xyz98#",
            "confirmPassword": "xyz98#",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "This email is already in use.");

    let session = login(&app, "palesa@example.com").await;
    assert_eq!(session["route"], "CandidateDashboard");
    let token = session["token"].as_str().unwrap().to_string();

    let (status, body) = call(&app, "GET", "/api/session/route", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["route"], "CandidateDashboard");

    let (status, _) = call(
        &app,
        "PATCH",
        "/api/profile",
        Some(&token),
        Some(json!({"name": "Palesa", "surname": "Mabaso", "company": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, profile) = call(&app, "GET", "/api/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["role"], "Candidate");
    assert!(profile["company"].is_null());

    let (status, _) = call(&app, "POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, "GET", "/api/session/route", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn employer_posts_and_sees_jobs() {
    let app = setup_app();
    register(&app, "hr@acme.example", "Employee").await;
    let session = login(&app, "hr@acme.example").await;
    assert_eq!(session["route"], "EmployerDashboard");
    let token = session["token"].as_str().unwrap().to_string();

    let deadline = (Utc::now() + Duration::days(10)).to_rfc3339();
    let (status, job) = call(
        &app,
        "POST",
        "/api/jobs",
        Some(&token),
        Some(json!({
            "title": "Data Engineer",
            "description": "Pipelines",
            "location": "Durban",
            "jobType": "Contract",
            "salary": "R40 000",
            "deadline": deadline,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", job);
    assert_eq!(job["status"], "Open");
    assert_eq!(job["applicantsCount"], 0);

    let (status, all) = call(&app, "GET", "/api/jobs", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["total"], 1);
    assert_eq!(all["items"][0]["id"], job["id"]);

    let (_, mine) = call(&app, "GET", "/api/jobs/mine", Some(&token), None).await;
    assert_eq!(mine["items"][0]["title"], "Data Engineer");

    let (status, dash) = call(&app, "GET", "/api/dashboard/employer", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dash["stats"]["activeJobs"], 1);
    assert_eq!(dash["recentActivity"][0]["title"], "Data Engineer");

    let past = (Utc::now() - Duration::days(3)).to_rfc3339();
    let (status, body) = call(
        &app,
        "POST",
        "/api/jobs",
        Some(&token),
        Some(json!({
            "title": "Late Job",
            "description": "x",
            "location": "x",
            "jobType": "x",
            "salary": "x",
            "deadline": past,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Deadline cannot be in the past.");
}

#[tokio::test]
async fn bearer_rejections() {
    let app = setup_app();

    let (status, body) = call(&app, "GET", "/api/jobs", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_authorization");

    let req = Request::builder()
        .uri("/api/jobs")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let (status, body) = call(&app, "GET", "/api/jobs", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");

    let (status, body) = call(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn auth_form_and_provider_messages() {
    let app = setup_app();

    let (status, body) = call(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Sizwe",
            "surname": "Zulu",
            "email": "sizwe@example.com",
            "password": "abc12!",
            "confirmPassword": "abc12?",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Passwords do not match.");

    register(&app, "sizwe@example.com", "Candidate").await;
    let (status, body) = call(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "sizwe@example.com", "password": "wrong1!"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password.");

    let (status, _) = call(
        &app,
        "POST",
        "/api/auth/forgot-password",
        None,
        Some(json!({"email": "nobody@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn account_without_profile_lands() {
    let app = setup_app();
    let (status, _) = call(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "No",
            "surname": "Role",
            "email": "norole@example.com",
            "password": "abc12!",
            "confirmPassword": "abc12!",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let session = login(&app, "norole@example.com").await;
    assert_eq!(session["route"], "Landing");
    let token = session["token"].as_str().unwrap().to_string();

    let (status, _) = call(&app, "GET", "/api/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, dash) = call(&app, "GET", "/api/dashboard/candidate", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(dash["greeting"].is_null());
    assert_eq!(dash["matchedJobs"], json!([]));
}
