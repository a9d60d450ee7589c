// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod exercise;
pub mod user;

pub use exercise::{ExerciseEntry, LogEntry};
pub use user::{UserRecord, UserSummary};
