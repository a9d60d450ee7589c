// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise submission and log retrieval.

use crate::error::{AppError, Result};
use crate::models::exercise::serialize_minutes;
use crate::models::LogEntry;
use crate::services::{LogFilter, LogQuery, NewExercise};
use crate::time_utils::today_utc;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/{id}/exercises", post(add_exercise))
        .route("/api/users/{id}/logs", get(get_logs))
}

// ─── Add Exercise ────────────────────────────────────────────

/// The just-added entry merged with the owner's identity.
#[derive(Serialize)]
pub struct ExerciseResponse {
    pub id: String,
    pub username: String,
    pub date: String,
    #[serde(serialize_with = "serialize_minutes")]
    pub duration: Option<f64>,
    pub description: String,
}

/// Append an exercise to a user's log.
async fn add_exercise(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Form(form): Form<NewExercise>,
) -> Result<Json<ExerciseResponse>> {
    let entry = form.into_entry(today_utc())?;

    let record = state
        .db
        .append_exercise(&user_id, &entry)
        .await?
        .ok_or_else(|| AppError::user_not_found(&user_id))?;

    tracing::info!(
        user_id = %record.id,
        date = %entry.date,
        log_len = record.log.len(),
        "Exercise added"
    );

    Ok(Json(ExerciseResponse {
        id: record.id,
        username: record.username,
        date: entry.date,
        duration: entry.duration,
        description: entry.description,
    }))
}

// ─── Logs ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LogResponse {
    pub id: String,
    pub username: String,
    /// Total entries in the log, before any filtering
    pub count: usize,
    pub log: Vec<LogEntry>,
}

/// Get a user's log, optionally filtered by `from`, `to` and `limit`.
async fn get_logs(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<LogQuery>,
) -> Result<Json<LogResponse>> {
    let filter = LogFilter::from_query(&params);

    tracing::debug!(
        user_id = %user_id,
        from = ?filter.from,
        to = ?filter.to,
        limit = ?filter.limit,
        "Fetching log"
    );

    let record = state
        .db
        .get_user(&user_id)
        .await?
        .ok_or_else(|| AppError::user_not_found(&user_id))?;

    // Count is taken before filtering
    let count = record.log.len();
    let log = filter.apply(record.log);

    Ok(Json(LogResponse {
        id: record.id,
        username: record.username,
        count,
        log,
    }))
}
