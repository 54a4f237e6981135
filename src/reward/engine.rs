//! Weighted reward draws.

use super::random::RandomSource;
use super::table::RewardTable;
use super::types::{RarityTier, RewardDefinition};

/// Draws rewards from an immutable table. Safe to reuse across rounds.
#[derive(Debug, Clone)]
pub struct RewardEngine {
    table: RewardTable,
}

impl RewardEngine {
    pub fn new(table: RewardTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RewardTable {
        &self.table
    }

    /// Walks the cumulative tier weights for sample `u`.
    ///
    /// Returns `None` when `u` lands past the last threshold, which only
    /// happens through rounding when `u` is close to 1.
    pub fn tier_for_sample(&self, u: f64) -> Option<RarityTier> {
        let mut cumulative = 0.0;
        for group in self.table.tiers() {
            cumulative += group.weight;
            if u < cumulative {
                return Some(group.tier);
            }
        }
        None
    }

    /// Draws one reward.
    ///
    /// The first sample picks the tier. When the tier holds several items a
    /// second, independent sample picks one of them uniformly; single-item
    /// tiers consume no extra randomness. If the walk exhausts, the table's
    /// fallback entry is returned.
    pub fn draw(&self, rng: &mut impl RandomSource) -> &RewardDefinition {
        let roll = rng.next_unit();

        let Some(tier) = self.tier_for_sample(roll) else {
            log::debug!("roll {roll} past every threshold, using fallback");
            return self.table.fallback();
        };

        match self.table.tier(tier) {
            Some(group) if group.items.len() > 1 => &group.items[rng.next_index(group.items.len())],
            Some(group) => &group.items[0],
            None => self.table.fallback(),
        }
    }
}
