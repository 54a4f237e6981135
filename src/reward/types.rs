//! Reward data structures.
//!
//! A catch is described by a [`RewardDefinition`]. Definitions are grouped
//! into rarity tiers; the tier carries the draw probability, the items inside
//! a tier share it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rarity tiers in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RarityTier {
    Common = 0,
    Rare = 1,
    Legendary = 2,
}

impl RarityTier {
    /// All tiers in the fixed order the engine walks them.
    pub const ALL: [RarityTier; 3] = [RarityTier::Common, RarityTier::Rare, RarityTier::Legendary];

    pub fn name(&self) -> &'static str {
        match self {
            RarityTier::Common => "common",
            RarityTier::Rare => "rare",
            RarityTier::Legendary => "legendary",
        }
    }

    /// Capitalized label for the result panel.
    pub fn label(&self) -> &'static str {
        match self {
            RarityTier::Common => "Common",
            RarityTier::Rare => "Rare",
            RarityTier::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One obtainable catch. Immutable once a table is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardDefinition {
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub description: String,
    pub rarity: RarityTier,
    pub token_reward: u64,
    /// Probability of the whole tier, shared by every item in it.
    pub weight: f64,
}

impl RewardDefinition {
    pub fn new(name: &str, rarity: RarityTier, token_reward: u64, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            emoji: String::new(),
            description: String::new(),
            rarity,
            token_reward,
            weight,
        }
    }

    pub fn with_flavor(mut self, emoji: &str, description: &str) -> Self {
        self.emoji = emoji.to_string();
        self.description = description.to_string();
        self
    }

    /// Emoji and name, e.g. "🐡 Golden Arowana".
    pub fn title(&self) -> String {
        if self.emoji.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.emoji, self.name)
        }
    }
}
