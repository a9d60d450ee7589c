// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise Tracker: log workouts against users and query them back
//!
//! This crate provides the REST API for creating users, appending exercise
//! entries to their logs, and retrieving filtered logs.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::ExerciseDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: ExerciseDb,
}
