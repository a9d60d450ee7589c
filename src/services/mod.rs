// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod exercise;
pub mod log;

pub use exercise::NewExercise;
pub use log::{DateBound, LogFilter, LogQuery};
