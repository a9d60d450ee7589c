// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User creation and listing.

use crate::error::Result;
use crate::models::UserSummary;
use crate::AppState;
use axum::{extract::State, routing::get, Form, Json, Router};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/users", get(list_users).post(create_user))
}

#[derive(Deserialize)]
struct CreateUserForm {
    #[serde(default)]
    username: String,
}

/// Create a user. Duplicate usernames are allowed and get distinct ids.
async fn create_user(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CreateUserForm>,
) -> Result<Json<UserSummary>> {
    let record = state.db.create_user(&form.username).await?;
    tracing::info!(user_id = %record.id, "User created");
    Ok(Json(record.summary()))
}

/// List every user as `{ id, username }`.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserSummary>>> {
    let users = state.db.list_users().await?;
    tracing::debug!(count = users.len(), "Listed users");
    Ok(Json(users))
}
