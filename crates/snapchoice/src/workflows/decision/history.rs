use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::RankedResult;

/// Storage slot holding the serialized history list.
pub const HISTORY_NAMESPACE: &str = "snapchoice_history";
/// Number of past decisions retained.
pub const HISTORY_CAPACITY: usize = 5;
/// Context recorded when the user left it blank.
pub const UNTITLED_CONTEXT: &str = "Decision";

/// Record of a completed scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub context: String,
    pub winner: String,
    pub score: f64,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn from_result(
        context: &str,
        result: &RankedResult,
        timestamp: DateTime<Utc>,
    ) -> Option<Self> {
        let winner = result.winner()?;
        let context = if context.is_empty() {
            UNTITLED_CONTEXT.to_string()
        } else {
            context.to_string()
        };

        Some(Self {
            context,
            winner: winner.name.clone(),
            score: winner.score,
            timestamp,
        })
    }
}

/// Process-wide string slots, in the spirit of browser local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store file is not a valid key-value map: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("stored history is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("history could not be serialized: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Rolling most-recent-first log kept in a single store slot.
pub struct HistoryLog<S> {
    store: S,
    capacity: usize,
}

impl<S: KeyValueStore> HistoryLog<S> {
    pub fn new(store: S) -> Self {
        Self::with_capacity(store, HISTORY_CAPACITY)
    }

    pub fn with_capacity(store: S, capacity: usize) -> Self {
        Self { store, capacity }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn entries(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        match self.store.get(HISTORY_NAMESPACE)? {
            Some(raw) => serde_json::from_str(&raw).map_err(HistoryError::Corrupt),
            None => Ok(Vec::new()),
        }
    }

    /// Prepends `entry` and truncates to capacity. Returns the stored list.
    pub fn record(&self, entry: HistoryEntry) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut entries = match self.entries() {
            Ok(entries) => entries,
            Err(HistoryError::Corrupt(err)) => {
                warn!(error = %err, "discarding corrupt decision history");
                Vec::new()
            }
            Err(other) => return Err(other),
        };

        entries.insert(0, entry);
        entries.truncate(self.capacity);

        let raw = serde_json::to_string(&entries).map_err(HistoryError::Serialize)?;
        self.store.set(HISTORY_NAMESPACE, raw)?;
        Ok(entries)
    }
}
