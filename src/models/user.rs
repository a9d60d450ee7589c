//! User model for storage and API.

use crate::models::ExerciseEntry;
use serde::{Deserialize, Serialize};

/// User document stored in Firestore, one per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Opaque identifier (also used as document ID)
    pub id: String,
    /// Display name; not unique
    pub username: String,
    /// Exercise entries in submission order
    #[serde(default)]
    pub log: Vec<ExerciseEntry>,
    /// When the user was created (RFC3339)
    #[serde(default)]
    pub created_at: String,
}

impl UserRecord {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            username: self.username.clone(),
        }
    }
}

/// The `{ id, username }` projection returned by the user endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
}
