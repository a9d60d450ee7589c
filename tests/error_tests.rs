// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error responses: unknown users, malformed query bounds, datastore failures.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use exercise_tracker::error::AppError;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_logs_for_unknown_user_is_not_found() {
    let (app, _) = common::create_test_app();

    let (status, json) = common::get_json(&app, "/api/users/does-not-exist/logs").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
    assert_eq!(json["details"], "User does-not-exist not found");
}

#[tokio::test]
async fn test_add_exercise_for_unknown_user_is_not_found() {
    let (app, _) = common::create_test_app();

    let (status, json) =
        common::add_exercise(&app, "does-not-exist", "Run", "30", Some("2024-01-01")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");

    // Nothing was created as a side effect
    let (_, users) = common::get_json(&app, "/api/users").await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn test_unparseable_bound_yields_empty_log() {
    let (app, _) = common::create_test_app();
    let id = common::create_user(&app, "alice").await;
    common::add_exercise(&app, &id, "Run", "30", Some("2024-01-01")).await;

    for query in ["from=not-a-date", "to=someday", "from=2023-01-01&to=later"] {
        let (status, json) =
            common::get_json(&app, &format!("/api/users/{}/logs?{}", id, query)).await;

        assert_eq!(status, StatusCode::OK, "query {query:?}");
        assert_eq!(json["count"], 1);
        assert_eq!(json["log"], json!([]));
    }
}

#[tokio::test]
async fn test_datastore_failure_is_500_without_details() {
    let (app, _) = common::create_offline_app();

    let cases = [
        common::post_form(&app, "/api/users", &[("username", "alice")]).await,
        common::get_json(&app, "/api/users").await,
        common::add_exercise(&app, "some-id", "Run", "30", None).await,
        common::get_json(&app, "/api/users/some-id/logs").await,
    ];

    for (status, json) in cases {
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({ "error": "database_error" }));
    }
}

#[tokio::test]
async fn test_internal_error_hides_details() {
    let response = AppError::Internal(anyhow::anyhow!("secret connection string")).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, json!({ "error": "internal_error" }));
}
