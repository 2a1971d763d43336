#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Persistence seam for finished-game score records.
//!
//! The simulation core never talks to a remote document store directly; it
//! hands finished runs to a [`ScoreStore`] and treats every call as fallible.
//! When the store is unavailable the run still completes and the record is
//! reported locally only. An in-memory implementation backs tests and the
//! headless CLI, and [`archive`] provides a versioned single-line export
//! format for carrying records out-of-band while offline.

pub mod archive;

use snake_arcade_core::{Difficulty, PlayerId, ScoreRecord};
use thiserror::Error;

/// Failures surfaced by a score store.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing store cannot be reached; callers degrade to local-only.
    #[error("score store unavailable: {0}")]
    Unavailable(String),
}

/// Sink and source for persisted score records.
pub trait ScoreStore {
    /// Persists a finished-game record.
    fn save_score(&mut self, record: &ScoreRecord) -> Result<(), StoreError>;

    /// Fetches persisted records, optionally scoped to a difficulty bucket.
    fn fetch_records(&self, difficulty: Option<Difficulty>) -> Result<Vec<ScoreRecord>, StoreError>;

    /// Fetches the records persisted for a single player.
    fn fetch_player_records(&self, player: &PlayerId) -> Result<Vec<ScoreRecord>, StoreError> {
        Ok(self
            .fetch_records(None)?
            .into_iter()
            .filter(|record| &record.player == player)
            .collect())
    }
}

/// Volatile store keeping records in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<ScoreRecord>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the provided records.
    #[must_use]
    pub fn with_records(records: Vec<ScoreRecord>) -> Self {
        Self { records }
    }

    /// Number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Reports whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ScoreStore for MemoryStore {
    fn save_score(&mut self, record: &ScoreRecord) -> Result<(), StoreError> {
        self.records.push(record.clone());
        Ok(())
    }

    fn fetch_records(&self, difficulty: Option<Difficulty>) -> Result<Vec<ScoreRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|record| difficulty.map_or(true, |bucket| record.difficulty == bucket))
            .cloned()
            .collect())
    }
}

/// Store that fails every call, mimicking an unreachable backend.
#[derive(Debug, Default)]
pub struct OfflineStore;

impl ScoreStore for OfflineStore {
    fn save_score(&mut self, _record: &ScoreRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline mode".to_owned()))
    }

    fn fetch_records(
        &self,
        _difficulty: Option<Difficulty>,
    ) -> Result<Vec<ScoreRecord>, StoreError> {
        Err(StoreError::Unavailable("offline mode".to_owned()))
    }
}
