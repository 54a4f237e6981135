//! Game configuration loaded from ~/.fishy-fortune/config.json.

use crate::constants::{CONFIG_FILENAME, PRESENTATION_DURATION_MS, STORAGE_KEY};
use crate::error::{ConfigError, PersistenceError, Result};
use crate::reward::{RewardDefinition, RewardTable};
use crate::utils::persistence::{data_path, load_json};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use std::time::Duration;

/// Which reward table to play with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableSource {
    /// A built-in table: `reference` or `nusantara`
    Named(String),
    /// Inline entries, validated like any other table
    Custom(Vec<RewardDefinition>),
}

impl Default for TableSource {
    fn default() -> Self {
        TableSource::Named("reference".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub storage_key: String,
    pub presentation_ms: u64,
    pub table: TableSource,
    /// Link embedded in shared posts
    pub embed_url: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            presentation_ms: PRESENTATION_DURATION_MS,
            table: TableSource::default(),
            embed_url: None,
        }
    }
}

impl GameConfig {
    /// Missing file yields defaults; a malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        match load_json(path) {
            Ok(config) => Ok(config.unwrap_or_default()),
            Err(PersistenceError::Corrupt(e)) => Err(ConfigError::Parse(e)),
            Err(PersistenceError::Io(e)) => Err(ConfigError::Io(e)),
            Err(PersistenceError::Unavailable(reason)) => {
                Err(ConfigError::Io(io::Error::new(io::ErrorKind::Other, reason)))
            }
        }
    }

    pub fn load_default() -> Result<Self> {
        Self::load(&data_path(CONFIG_FILENAME)?)
    }

    /// Builds and validates the configured reward table.
    pub fn reward_table(&self) -> Result<RewardTable> {
        match &self.table {
            TableSource::Named(name) => RewardTable::by_name(name),
            TableSource::Custom(entries) => RewardTable::new(entries.clone()),
        }
    }

    pub fn presentation_duration(&self) -> Duration {
        Duration::from_millis(self.presentation_ms)
    }
}
