//! Player statistics record.

use crate::reward::RewardDefinition;
use serde::{Deserialize, Serialize};

/// Cumulative progress. Both counters only ever grow for the life of a save.
///
/// Serialized as `{"totalCatches": n, "totalTokens": n}`. Records written by
/// the browser build used `totalFishes` for the catch count and are still read.
/// Unknown fields are ignored. When a record carries both names,
/// `totalCatches` wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredStatistics")]
pub struct PlayerStatistics {
    pub total_catches: u64,
    pub total_tokens: u64,
}

/// On-disk shape, accepting both catch field names.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredStatistics {
    #[serde(default)]
    total_catches: Option<u64>,
    #[serde(default)]
    total_fishes: Option<u64>,
    #[serde(default)]
    total_tokens: u64,
}

impl From<StoredStatistics> for PlayerStatistics {
    fn from(stored: StoredStatistics) -> Self {
        Self {
            total_catches: stored
                .total_catches
                .or(stored.total_fishes)
                .unwrap_or_default(),
            total_tokens: stored.total_tokens,
        }
    }
}

impl PlayerStatistics {
    pub fn new(total_catches: u64, total_tokens: u64) -> Self {
        Self {
            total_catches,
            total_tokens,
        }
    }
}

/// Adds one catch and its token reward. Pure; the caller persists the result.
pub fn record(reward: &RewardDefinition, current: PlayerStatistics) -> PlayerStatistics {
    PlayerStatistics {
        total_catches: current.total_catches.saturating_add(1),
        total_tokens: current.total_tokens.saturating_add(reward.token_reward),
    }
}
