//! Error types for Fishy Fortune.
//!
//! Only [`ConfigError`] is fatal. Everything else is absorbed by the session
//! controller or the statistics store and reported without stopping play.

use crate::reward::RarityTier;
use thiserror::Error;

/// Invalid reward table or unreadable configuration. Raised at load time.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reward table is empty")]
    EmptyTable,

    #[error("reward '{name}' has weight {weight}, expected a value in (0, 1]")]
    InvalidWeight { name: String, weight: f64 },

    #[error("reward '{name}' has weight {found} but the {tier} tier weight is {expected}")]
    InconsistentTierWeight {
        tier: RarityTier,
        name: String,
        expected: f64,
        found: f64,
    },

    #[error("tier weights sum to {sum}, expected 1.0")]
    WeightSum { sum: f64 },

    #[error("unknown reward table '{0}'")]
    UnknownTable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Storage unavailable, full, or holding something we cannot read.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The presentation collaborator could not finish a round.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresentationError {
    #[error("presentation already running for round {0}")]
    Busy(u64),

    #[error("presentation interrupted: {0}")]
    Interrupted(String),
}

/// Sharing a result to the feed failed. Never changes session state.
#[derive(Error, Debug)]
pub enum ShareError {
    #[error("no resolved round to share")]
    NothingToShare,

    #[error("share rejected: {0}")]
    Rejected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The host identity context could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
