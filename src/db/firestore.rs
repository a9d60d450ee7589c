// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Datastore wrapper with typed user and exercise-log operations.
//!
//! Backed by Firestore in production. An in-memory store is available for
//! local runs and tests, and an offline mode fails every call.

use crate::db::{collections, generate_id, MemoryStore};
use crate::error::AppError;
use crate::models::{ExerciseEntry, UserRecord, UserSummary};
use crate::time_utils::format_utc_rfc3339;
use firestore::paths;
use ring::rand::{SecureRandom, SystemRandom};
use std::time::Duration;

/// Transactional appends give up after this many aborted attempts.
const MAX_APPEND_ATTEMPTS: u32 = 10;
const RETRY_BASE_DELAY_MS: u64 = 20;
const MAX_RETRY_DELAY_MS: u64 = 1_000;

#[derive(Clone)]
enum Backend {
    Firestore(firestore::FirestoreDb),
    Memory(MemoryStore),
    Offline,
}

/// User datastore client, shared by all handlers.
#[derive(Clone)]
pub struct ExerciseDb {
    backend: Backend,
}

impl ExerciseDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator accepts any token; skip credential discovery entirely.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            backend: Backend::Firestore(client),
        })
    }

    /// Create a store that keeps everything in process memory.
    pub fn new_in_memory() -> Self {
        Self {
            backend: Backend::Memory(MemoryStore::new()),
        }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    fn offline() -> AppError {
        AppError::Database("Database not connected (offline mode)".to_string())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Create a user with an empty log. Usernames are not required to be unique.
    pub async fn create_user(&self, username: &str) -> Result<UserRecord, AppError> {
        let record = UserRecord {
            id: generate_id()?,
            username: username.to_string(),
            log: Vec::new(),
            created_at: format_utc_rfc3339(chrono::Utc::now()),
        };

        match &self.backend {
            Backend::Firestore(client) => {
                let _: () = client
                    .fluent()
                    .insert()
                    .into(collections::USERS)
                    .document_id(&record.id)
                    .object(&record)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }
            Backend::Memory(store) => store.insert_user(record.clone()),
            Backend::Offline => return Err(Self::offline()),
        }

        tracing::debug!(user_id = %record.id, "Created user");
        Ok(record)
    }

    /// List every user as an `{ id, username }` projection.
    pub async fn list_users(&self) -> Result<Vec<UserSummary>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .fields(paths!(UserRecord::{id, username}))
                .from(collections::USERS)
                .obj()
                .query()
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(store) => Ok(store.list_users()),
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Get a user record, including its full log.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => client
                .fluent()
                .select()
                .by_id_in(collections::USERS)
                .obj()
                .one(user_id)
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(store) => Ok(store.get_user(user_id)),
            Backend::Offline => Err(Self::offline()),
        }
    }

    // ─── Exercise Log Operations ─────────────────────────────────

    /// Atomically append an entry to a user's log.
    ///
    /// Returns the updated record, or `None` if no user has this id.
    pub async fn append_exercise(
        &self,
        user_id: &str,
        entry: &ExerciseEntry,
    ) -> Result<Option<UserRecord>, AppError> {
        match &self.backend {
            Backend::Firestore(client) => {
                Self::append_exercise_firestore(client, user_id, entry).await
            }
            Backend::Memory(store) => Ok(store.push_entry(user_id, entry.clone())),
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Append inside a read-write transaction, retrying when Firestore aborts
    /// it because another append to the same user committed first.
    async fn append_exercise_firestore(
        client: &firestore::FirestoreDb,
        user_id: &str,
        entry: &ExerciseEntry,
    ) -> Result<Option<UserRecord>, AppError> {
        let mut attempt = 1;
        loop {
            match Self::try_append_firestore(client, user_id, entry).await {
                Ok(result) => return Ok(result),
                Err(AppendFailure::Contended(msg)) if attempt < MAX_APPEND_ATTEMPTS => {
                    tracing::debug!(user_id, attempt, error = %msg, "Append contended, retrying");
                    tokio::time::sleep(retry_delay(attempt)).await;
                    attempt += 1;
                }
                Err(AppendFailure::Contended(msg)) => {
                    return Err(AppError::Database(format!(
                        "Append still contended after {} attempts: {}",
                        attempt, msg
                    )));
                }
                Err(AppendFailure::Fatal(err)) => return Err(err),
            }
        }
    }

    /// One read-modify-write attempt.
    ///
    /// The read is made under the transaction's consistency selector, so a
    /// concurrent append to the same user aborts this commit instead of being
    /// overwritten by it.
    async fn try_append_firestore(
        client: &firestore::FirestoreDb,
        user_id: &str,
        entry: &ExerciseEntry,
    ) -> Result<Option<UserRecord>, AppendFailure> {
        let mut transaction = client.begin_transaction().await.map_err(|e| {
            AppendFailure::Fatal(AppError::Database(format!(
                "Failed to begin transaction: {}",
                e
            )))
        })?;

        let tx_client = client.clone_with_consistency_selector(
            firestore::FirestoreConsistencySelector::Transaction(
                transaction.transaction_id().clone(),
            ),
        );

        let current: Option<UserRecord> = tx_client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppendFailure::Contended(format!("read in transaction: {}", e)))?;

        let Some(mut record) = current else {
            let _ = transaction.rollback().await;
            return Ok(None);
        };

        record.log.push(entry.clone());

        client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(user_id)
            .object(&record)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppendFailure::Fatal(AppError::Database(format!(
                    "Failed to add log update to transaction: {}",
                    e
                )))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppendFailure::Contended(format!("commit: {}", e)))?;

        tracing::debug!(
            user_id,
            log_len = record.log.len(),
            "Exercise appended atomically"
        );

        Ok(Some(record))
    }
}

/// Why a single transactional append attempt did not complete.
enum AppendFailure {
    /// Transaction read or commit failed; typically an abort under contention
    Contended(String),
    Fatal(AppError),
}

/// Exponential backoff with up to 50% random jitter, capped at `MAX_RETRY_DELAY_MS`.
fn retry_delay(attempt: u32) -> Duration {
    let base = RETRY_BASE_DELAY_MS
        .saturating_mul(1 << attempt.saturating_sub(1).min(6))
        .min(MAX_RETRY_DELAY_MS);
    let mut byte = [0u8; 1];
    let jitter = match SystemRandom::new().fill(&mut byte) {
        Ok(()) => base / 2 * u64::from(byte[0]) / 255,
        Err(_) => 0,
    };
    Duration::from_millis(base + jitter)
}
