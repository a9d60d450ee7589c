// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Date-range and limit filtering of a user's exercise log.

use crate::models::{ExerciseEntry, LogEntry};
use crate::time_utils::parse_calendar_date;
use chrono::NaiveDate;
use serde::Deserialize;

/// Raw `from` / `to` / `limit` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// One side of a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// Inclusive calendar date
    Date(NaiveDate),
    /// The client sent something that is not a date; no entry satisfies it
    Invalid,
}

impl DateBound {
    fn parse(raw: Option<&str>) -> Option<Self> {
        let value = raw.map(str::trim).filter(|s| !s.is_empty())?;
        Some(parse_calendar_date(value).map_or(DateBound::Invalid, DateBound::Date))
    }
}

/// Parsed log filter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LogFilter {
    pub from: Option<DateBound>,
    pub to: Option<DateBound>,
    pub limit: Option<usize>,
}

impl LogFilter {
    /// Build a filter from query parameters.
    ///
    /// Empty parameters are treated as absent. A `limit` that is not a
    /// positive number is ignored. An unparseable date bound is kept and
    /// matches nothing, so the request still succeeds with an empty log.
    pub fn from_query(query: &LogQuery) -> Self {
        Self {
            from: DateBound::parse(query.from.as_deref()),
            to: DateBound::parse(query.to.as_deref()),
            limit: query.limit.as_deref().and_then(parse_limit),
        }
    }

    /// Whether an entry's date falls inside the bounds.
    ///
    /// Entries whose stored date cannot be parsed never match a bounded filter.
    pub fn matches(&self, entry: &ExerciseEntry) -> bool {
        if self.from.is_none() && self.to.is_none() {
            return true;
        }
        let Some(date) = parse_calendar_date(&entry.date) else {
            return false;
        };
        let after_from = match self.from {
            None => true,
            Some(DateBound::Date(from)) => date >= from,
            Some(DateBound::Invalid) => false,
        };
        let before_to = match self.to {
            None => true,
            Some(DateBound::Date(to)) => date <= to,
            Some(DateBound::Invalid) => false,
        };
        after_from && before_to
    }

    /// Filter by date, then keep at most `limit` leading entries.
    ///
    /// Insertion order is preserved and internal entry ids are dropped.
    pub fn apply(&self, log: Vec<ExerciseEntry>) -> Vec<LogEntry> {
        let filtered = log.into_iter().filter(|entry| self.matches(entry));
        match self.limit {
            Some(limit) => filtered.take(limit).map(LogEntry::from).collect(),
            None => filtered.map(LogEntry::from).collect(),
        }
    }
}

fn parse_limit(raw: &str) -> Option<usize> {
    let value: f64 = raw.trim().parse().ok()?;
    // Fractional limits truncate toward zero
    (value.is_finite() && value > 0.0).then(|| value.trunc() as usize)
}
