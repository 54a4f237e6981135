//! Fishy Fortune - a terminal fishing game with weighted random catches.
//!
//! This module exposes the game logic for testing and external use.

// Allow dead code in library - some functions are only used by the binaries
#![allow(dead_code)]

pub mod build_info;
pub mod config;
pub mod constants;
pub mod error;
pub mod identity;
pub mod reward;
pub mod session;
pub mod share;
pub mod simulator;
pub mod stats;
pub mod ui;
pub mod utils;

pub use config::{GameConfig, TableSource};
pub use error::{ConfigError, IdentityError, PersistenceError, PresentationError, ShareError};
pub use identity::{EnvIdentityProvider, IdentityResolver, PlayerIdentity, RetryPolicy};
pub use reward::{RandomSource, RarityTier, RewardDefinition, RewardEngine, RewardTable};
pub use session::{RoundEvent, SessionController, SessionPhase, TimedPresentation};
pub use stats::{FileStorage, MemoryStorage, PlayerStatistics, StatisticsStore};
