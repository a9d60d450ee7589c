// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Turning submitted exercise form fields into stored entries.

use crate::db::generate_id;
use crate::error::Result;
use crate::models::ExerciseEntry;
use crate::time_utils::{format_display_date, parse_calendar_date};
use chrono::NaiveDate;
use serde::Deserialize;

/// Form fields accepted by the add-exercise endpoint.
///
/// Every field is optional on the wire; missing text fields become empty.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NewExercise {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    pub date: Option<String>,
}

impl NewExercise {
    /// Build the entry to append, using `today` when no usable date was sent.
    pub fn into_entry(self, today: NaiveDate) -> Result<ExerciseEntry> {
        let date = self
            .date
            .as_deref()
            .and_then(parse_calendar_date)
            .unwrap_or(today);

        Ok(ExerciseEntry {
            entry_id: generate_id()?,
            description: self.description,
            duration: parse_duration(&self.duration),
            date: format_display_date(date),
        })
    }
}

/// Coerce a submitted duration to minutes. Non-numeric input yields `None`.
pub fn parse_duration(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|d| d.is_finite())
}
