//! Fail-soft statistics persistence.
//!
//! Losing historical stats is recoverable; blocking play is not. `load` and
//! `save` therefore never return errors. The `try_` variants expose the
//! underlying failure for callers that want to show it.

use super::storage::KeyValueStorage;
use super::types::PlayerStatistics;
use crate::constants::STORAGE_KEY;
use crate::error::PersistenceError;

/// Reads and writes one serialized [`PlayerStatistics`] record under a fixed key.
#[derive(Debug, Clone)]
pub struct StatisticsStore<S: KeyValueStorage> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> StatisticsStore<S> {
    /// Store using the default key (`fishy-fortune-state`).
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Reads the record. `Ok(None)` on first run.
    pub fn try_load(&self) -> Result<Option<PlayerStatistics>, PersistenceError> {
        match self.storage.get(&self.key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Reads the record, falling back to zeros when absent, unreadable or corrupt.
    pub fn load(&self) -> PlayerStatistics {
        match self.try_load() {
            Ok(Some(stats)) => stats,
            Ok(None) => PlayerStatistics::default(),
            Err(e) => {
                log::warn!("Failed to load statistics from '{}': {}", self.key, e);
                PlayerStatistics::default()
            }
        }
    }

    pub fn try_save(&mut self, stats: &PlayerStatistics) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(stats)?;
        self.storage.set(&self.key, &json)
    }

    /// Writes the record. Failures are logged and reported as `false`.
    pub fn save(&mut self, stats: &PlayerStatistics) -> bool {
        match self.try_save(stats) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to save statistics to '{}': {}", self.key, e);
                false
            }
        }
    }
}
