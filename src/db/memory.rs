// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-local user store backed by a concurrent map.
//!
//! Appends take the shard write lock for the target user, so concurrent
//! submissions to the same user are never lost.

use crate::models::{ExerciseEntry, UserRecord, UserSummary};
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory user documents keyed by user id.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<String, UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_user(&self, record: UserRecord) {
        self.users.insert(record.id.clone(), record);
    }

    /// All users, ordered by id like a Firestore collection scan.
    pub fn list_users(&self) -> Vec<UserSummary> {
        let mut users: Vec<UserSummary> = self.users.iter().map(|r| r.summary()).collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }

    pub fn get_user(&self, user_id: &str) -> Option<UserRecord> {
        self.users.get(user_id).map(|r| r.value().clone())
    }

    /// Append an entry and return the updated record, or `None` for an unknown id.
    pub fn push_entry(&self, user_id: &str, entry: ExerciseEntry) -> Option<UserRecord> {
        let mut record = self.users.get_mut(user_id)?;
        record.log.push(entry);
        Some(record.clone())
    }
}
