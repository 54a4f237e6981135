//! Reward tables: validation and the built-in catch lists.

use super::types::{RarityTier, RewardDefinition};
use crate::constants::WEIGHT_TOLERANCE;
use crate::error::{ConfigError, Result};

/// Token rewards per tier in the built-in tables.
pub const TOKENS_COMMON: u64 = 0;
pub const TOKENS_RARE: u64 = 5;
pub const TOKENS_LEGENDARY: u64 = 50;

/// Tier probabilities in the built-in tables (70% / 25% / 5%).
pub const WEIGHT_COMMON: f64 = 0.70;
pub const WEIGHT_RARE: f64 = 0.25;
pub const WEIGHT_LEGENDARY: f64 = 0.05;

/// All items of one tier plus the probability they share.
#[derive(Debug, Clone, PartialEq)]
pub struct TierGroup {
    pub tier: RarityTier,
    pub weight: f64,
    pub items: Vec<RewardDefinition>,
}

/// A validated reward table. Only non-empty tiers are kept, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardTable {
    tiers: Vec<TierGroup>,
}

impl RewardTable {
    /// Builds a table, rejecting anything that would draw a wrong distribution.
    ///
    /// # Errors
    /// - [`ConfigError::EmptyTable`] when `entries` is empty
    /// - [`ConfigError::InvalidWeight`] for a weight outside `(0, 1]`
    /// - [`ConfigError::InconsistentTierWeight`] when items of one tier disagree
    /// - [`ConfigError::WeightSum`] when tier weights do not sum to 1.0
    pub fn new(entries: Vec<RewardDefinition>) -> Result<Self> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyTable);
        }

        for entry in &entries {
            if !entry.weight.is_finite() || entry.weight <= 0.0 || entry.weight > 1.0 {
                return Err(ConfigError::InvalidWeight {
                    name: entry.name.clone(),
                    weight: entry.weight,
                });
            }
        }

        let tiers = group_by_tier(entries);

        for group in &tiers {
            if let Some(odd) = group
                .items
                .iter()
                .find(|item| (item.weight - group.weight).abs() > WEIGHT_TOLERANCE)
            {
                return Err(ConfigError::InconsistentTierWeight {
                    tier: group.tier,
                    name: odd.name.clone(),
                    expected: group.weight,
                    found: odd.weight,
                });
            }
        }

        let sum: f64 = tiers.iter().map(|group| group.weight).sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ConfigError::WeightSum { sum });
        }

        Ok(Self { tiers })
    }

    /// Parses a JSON array of reward definitions and validates it.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<RewardDefinition> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Looks up a built-in table by name (`reference` or `nusantara`).
    pub fn by_name(name: &str) -> Result<Self> {
        match name {
            "reference" => Self::reference(),
            "nusantara" => Self::nusantara(),
            other => Err(ConfigError::UnknownTable(other.to_string())),
        }
    }

    /// One catch per tier.
    pub fn reference() -> Result<Self> {
        Self::new(reference_entries())
    }

    /// Three catches per tier, each tier keeping the reference probability.
    pub fn nusantara() -> Result<Self> {
        Self::new(nusantara_entries())
    }

    pub fn tiers(&self) -> &[TierGroup] {
        &self.tiers
    }

    pub fn tier(&self, tier: RarityTier) -> Option<&TierGroup> {
        self.tiers.iter().find(|group| group.tier == tier)
    }

    /// Probability of drawing `tier`; 0.0 when the table has no such tier.
    pub fn tier_weight(&self, tier: RarityTier) -> f64 {
        self.tier(tier).map_or(0.0, |group| group.weight)
    }

    /// Every definition in draw order.
    pub fn entries(&self) -> impl Iterator<Item = &RewardDefinition> {
        self.tiers.iter().flat_map(|group| group.items.iter())
    }

    pub fn len(&self) -> usize {
        self.tiers.iter().map(|group| group.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Entry returned when a draw walks past every threshold: the first
    /// common entry, or the first entry of the lowest tier present.
    pub fn fallback(&self) -> &RewardDefinition {
        &self.tiers[0].items[0]
    }
}

/// Groups entries by tier in [`RarityTier::ALL`] order, keeping declaration
/// order inside each tier. The first item of a tier sets the tier weight.
fn group_by_tier(entries: Vec<RewardDefinition>) -> Vec<TierGroup> {
    let mut tiers = Vec::new();
    for tier in RarityTier::ALL {
        let items: Vec<RewardDefinition> = entries
            .iter()
            .filter(|entry| entry.rarity == tier)
            .cloned()
            .collect();
        if let Some(first) = items.first() {
            tiers.push(TierGroup {
                tier,
                weight: first.weight,
                items,
            });
        }
    }
    tiers
}

pub fn reference_entries() -> Vec<RewardDefinition> {
    vec![
        RewardDefinition::new("Ikan Mas", RarityTier::Common, TOKENS_COMMON, WEIGHT_COMMON)
            .with_flavor("🐟", "A goldfish, the everyday river catch"),
        RewardDefinition::new("Ikan Koi", RarityTier::Rare, TOKENS_RARE, WEIGHT_RARE)
            .with_flavor("🐠", "A beautiful and hard-to-find koi"),
        RewardDefinition::new(
            "Ikan Arowana",
            RarityTier::Legendary,
            TOKENS_LEGENDARY,
            WEIGHT_LEGENDARY,
        )
        .with_flavor("🐡", "A super rare arowana!"),
    ]
}

pub fn nusantara_entries() -> Vec<RewardDefinition> {
    let common = |name: &str, description: &str| {
        RewardDefinition::new(name, RarityTier::Common, TOKENS_COMMON, WEIGHT_COMMON)
            .with_flavor("🐟", description)
    };
    let rare = |name: &str, description: &str| {
        RewardDefinition::new(name, RarityTier::Rare, TOKENS_RARE, WEIGHT_RARE)
            .with_flavor("🐠", description)
    };
    let legendary = |name: &str, emoji: &str, description: &str| {
        RewardDefinition::new(name, RarityTier::Legendary, TOKENS_LEGENDARY, WEIGHT_LEGENDARY)
            .with_flavor(emoji, description)
    };

    vec![
        common("Ikan Mas", "A goldfish, the everyday river catch"),
        common("Ikan Lele", "A catfish that loves the mud"),
        common("Ikan Nila", "A tame little tilapia"),
        rare("Ikan Koi", "A beautiful and hard-to-find koi"),
        rare("Ikan Cupang", "A betta with splendid fins"),
        rare("Ikan Arwana", "An exotic arwana"),
        legendary("Ikan Arowana", "🐡", "A super rare arowana!"),
        legendary("Ikan Napoleon", "🐡", "The napoleon wrasse, king of the reef!"),
        legendary("Ikan Paus", "🐋", "A legendary mini whale!"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_pass_validation() {
        for name in ["reference", "nusantara"] {
            let table = RewardTable::by_name(name).unwrap();
            assert!(!table.is_empty(), "{name}");
        }
    }

    #[test]
    fn test_reference_table_shape() {
        let table = RewardTable::reference().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.tiers().len(), 3);
        assert_eq!(table.tier_weight(RarityTier::Common), 0.70);
        assert_eq!(table.tier_weight(RarityTier::Rare), 0.25);
        assert_eq!(table.tier_weight(RarityTier::Legendary), 0.05);
        assert_eq!(table.fallback().name, "Ikan Mas");
    }

    #[test]
    fn test_nusantara_table_groups_three_per_tier() {
        let table = RewardTable::nusantara().unwrap();
        assert_eq!(table.len(), 9);
        for group in table.tiers() {
            assert_eq!(group.items.len(), 3, "{} tier", group.tier);
            assert!(group.items.iter().all(|item| item.rarity == group.tier));
        }
        // Tier probability is shared, not tripled
        let sum: f64 = table.tiers().iter().map(|g| g.weight).sum();
        assert!((sum - 1.0).abs() < WEIGHT_TOLERANCE);
    }

    #[test]
    fn test_tiers_are_ordered_regardless_of_declaration_order() {
        let table = RewardTable::new(vec![
            RewardDefinition::new("Whale", RarityTier::Legendary, 50, 0.05),
            RewardDefinition::new("Koi", RarityTier::Rare, 5, 0.25),
            RewardDefinition::new("Carp", RarityTier::Common, 0, 0.70),
        ])
        .unwrap();
        let order: Vec<RarityTier> = table.tiers().iter().map(|g| g.tier).collect();
        assert_eq!(
            order,
            vec![RarityTier::Common, RarityTier::Rare, RarityTier::Legendary]
        );
        assert_eq!(table.fallback().name, "Carp");
    }

    #[test]
    fn test_empty_table_is_rejected() {
        assert!(matches!(
            RewardTable::new(Vec::new()),
            Err(ConfigError::EmptyTable)
        ));
    }

    #[test]
    fn test_weights_not_summing_to_one_are_rejected() {
        let result = RewardTable::new(vec![
            RewardDefinition::new("Carp", RarityTier::Common, 0, 0.70),
            RewardDefinition::new("Koi", RarityTier::Rare, 5, 0.20),
        ]);
        match result {
            Err(ConfigError::WeightSum { sum }) => assert!((sum - 0.9).abs() < 1e-12),
            other => panic!("expected WeightSum, got {:?}", other),
        }
    }

    #[test]
    fn test_sum_within_tolerance_is_accepted() {
        let table = RewardTable::new(vec![
            RewardDefinition::new("Carp", RarityTier::Common, 0, 0.70),
            RewardDefinition::new("Koi", RarityTier::Rare, 5, 0.25),
            RewardDefinition::new("Whale", RarityTier::Legendary, 50, 0.05 - 5e-10),
        ]);
        assert!(table.is_ok());
    }

    #[test]
    fn test_out_of_range_weights_are_rejected() {
        for weight in [0.0, -0.1, 1.5, f64::NAN] {
            let result = RewardTable::new(vec![RewardDefinition::new(
                "Carp",
                RarityTier::Common,
                0,
                weight,
            )]);
            assert!(
                matches!(result, Err(ConfigError::InvalidWeight { .. })),
                "weight {weight} should be rejected"
            );
        }
    }

    #[test]
    fn test_items_disagreeing_on_tier_weight_are_rejected() {
        let result = RewardTable::new(vec![
            RewardDefinition::new("Carp", RarityTier::Common, 0, 0.70),
            RewardDefinition::new("Perch", RarityTier::Common, 0, 0.60),
            RewardDefinition::new("Koi", RarityTier::Rare, 5, 0.30),
        ]);
        match result {
            Err(ConfigError::InconsistentTierWeight { tier, name, .. }) => {
                assert_eq!(tier, RarityTier::Common);
                assert_eq!(name, "Perch");
            }
            other => panic!("expected InconsistentTierWeight, got {:?}", other),
        }
    }

    #[test]
    fn test_single_tier_table_is_valid() {
        let table =
            RewardTable::new(vec![RewardDefinition::new("Carp", RarityTier::Common, 0, 1.0)])
                .unwrap();
        assert_eq!(table.tier_weight(RarityTier::Rare), 0.0);
        assert!(table.tier(RarityTier::Legendary).is_none());
    }

    #[test]
    fn test_table_without_common_tier_falls_back_to_lowest_tier() {
        let table = RewardTable::new(vec![
            RewardDefinition::new("Whale", RarityTier::Legendary, 50, 0.5),
            RewardDefinition::new("Koi", RarityTier::Rare, 5, 0.5),
        ])
        .unwrap();
        assert_eq!(table.fallback().name, "Koi");
    }

    #[test]
    fn test_from_json_validates() {
        let json = r#"[
            {"name": "Carp", "rarity": "common", "tokenReward": 0, "weight": 0.7},
            {"name": "Koi", "rarity": "rare", "tokenReward": 5, "weight": 0.3}
        ]"#;
        let table = RewardTable::from_json(json).unwrap();
        assert_eq!(table.len(), 2);

        assert!(matches!(
            RewardTable::from_json("[]"),
            Err(ConfigError::EmptyTable)
        ));
        assert!(matches!(
            RewardTable::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_by_name() {
        assert_eq!(RewardTable::by_name("reference").unwrap().len(), 3);
        assert_eq!(RewardTable::by_name("nusantara").unwrap().len(), 9);
        assert!(matches!(
            RewardTable::by_name("atlantis"),
            Err(ConfigError::UnknownTable(_))
        ));
    }
}
