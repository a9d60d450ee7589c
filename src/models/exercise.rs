// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Exercise entries embedded in a user's log.

use serde::{Deserialize, Serialize, Serializer};

/// Largest magnitude at which every integer is exactly representable in an f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Stored exercise entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    /// Internal identifier, never exposed by the API
    pub entry_id: String,
    pub description: String,
    /// Minutes; `None` when the submitted value was not a number
    pub duration: Option<f64>,
    /// Calendar date in display format (e.g. "Mon Jan 01 2024")
    pub date: String,
}

/// Log entry as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub description: String,
    #[serde(serialize_with = "serialize_minutes")]
    pub duration: Option<f64>,
    pub date: String,
}

impl From<ExerciseEntry> for LogEntry {
    fn from(entry: ExerciseEntry) -> Self {
        Self {
            description: entry.description,
            duration: entry.duration,
            date: entry.date,
        }
    }
}

/// Serialize minutes as an integer when the value is whole, so `30` stays `30`.
pub fn serialize_minutes<S>(minutes: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match *minutes {
        Some(m) if m.fract() == 0.0 && m.abs() <= MAX_EXACT_INTEGER => {
            serializer.serialize_i64(m as i64)
        }
        Some(m) => serializer.serialize_f64(m),
        None => serializer.serialize_none(),
    }
}
