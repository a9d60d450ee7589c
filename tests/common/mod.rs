// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use exercise_tracker::config::Config;
use exercise_tracker::db::ExerciseDb;
use exercise_tracker::routes::create_router;
use exercise_tracker::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> ExerciseDb {
    ExerciseDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Build a router over the given datastore.
#[allow(dead_code)]
pub fn app_with_db(db: ExerciseDb) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::default(),
        db,
    });
    (create_router(state.clone()), state)
}

/// Create a test app backed by the in-memory store.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    app_with_db(ExerciseDb::new_in_memory())
}

/// Create a test app whose datastore fails every call.
#[allow(dead_code)]
pub fn create_offline_app() -> (Router, Arc<AppState>) {
    app_with_db(ExerciseDb::new_mock())
}

/// Encode `pairs` as an `application/x-www-form-urlencoded` body.
#[allow(dead_code)]
pub fn form_body(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// POST a form and return status plus parsed JSON body.
#[allow(dead_code)]
pub async fn post_form(
    app: &Router,
    uri: &str,
    pairs: &[(&str, &str)],
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body(pairs)))
        .unwrap();
    send(app, request).await
}

/// GET a URI and return status plus parsed JSON body.
#[allow(dead_code)]
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).expect("Response body should be JSON")
    };
    (status, json)
}

/// Create a user through the API and return its id.
#[allow(dead_code)]
pub async fn create_user(app: &Router, username: &str) -> String {
    let (status, json) = post_form(app, "/api/users", &[("username", username)]).await;
    assert_eq!(status, StatusCode::OK);
    json["id"].as_str().expect("id should be a string").to_string()
}

/// Add an exercise through the API.
#[allow(dead_code)]
pub async fn add_exercise(
    app: &Router,
    user_id: &str,
    description: &str,
    duration: &str,
    date: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut pairs = vec![("description", description), ("duration", duration)];
    if let Some(date) = date {
        pairs.push(("date", date));
    }
    post_form(app, &format!("/api/users/{}/exercises", user_id), &pairs).await
}
