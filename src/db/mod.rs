//! Database layer (Firestore, with an in-memory fallback).

pub mod firestore;
pub mod memory;

pub use firestore::ExerciseDb;
pub use memory::MemoryStore;

use crate::error::{AppError, Result};
use ring::rand::{SecureRandom, SystemRandom};

/// Collection names as constants.
pub mod collections {
    /// User documents, each embedding its exercise log
    pub const USERS: &str = "exercise_users";
}

/// Generate a random 128-bit identifier, hex encoded.
pub fn generate_id() -> Result<String> {
    let mut bytes = [0u8; 16];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;
    Ok(hex::encode(bytes))
}
