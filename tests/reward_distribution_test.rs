//! Reward distribution tests
//!
//! Large seeded runs through the real engine:
//! - Tier frequencies match the configured weights (chi-squared)
//! - Items inside a tier are picked uniformly
//! - Simulator report agrees with direct draws

use fishy_fortune::reward::{RarityTier, RewardEngine, RewardTable};
use fishy_fortune::simulator::{chi_squared, run_simulation, SimConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

const DRAWS: u64 = 100_000;

// Chi-squared critical value at p = 0.001, df = 2
const CRITICAL_DF2: f64 = 13.816;

fn tier_counts(engine: &RewardEngine, seed: u64, draws: u64) -> HashMap<RarityTier, u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut counts = HashMap::new();
    for _ in 0..draws {
        *counts.entry(engine.draw(&mut rng).rarity).or_insert(0) += 1;
    }
    counts
}

// ============================================================================
// Tier Frequencies
// ============================================================================

#[test]
fn test_reference_table_matches_weights() {
    let engine = RewardEngine::new(RewardTable::reference().unwrap());
    let counts = tier_counts(&engine, 12345, DRAWS);

    let pairs: Vec<(u64, f64)> = [
        (RarityTier::Common, 0.70),
        (RarityTier::Rare, 0.25),
        (RarityTier::Legendary, 0.05),
    ]
    .iter()
    .map(|(tier, weight)| (counts.get(tier).copied().unwrap_or(0), weight * DRAWS as f64))
    .collect();

    let statistic = chi_squared(&pairs);
    assert!(
        statistic < CRITICAL_DF2,
        "chi-squared {statistic} exceeds {CRITICAL_DF2}: {counts:?}"
    );
}

#[test]
fn test_nusantara_tier_weights_are_not_multiplied_by_item_count() {
    let engine = RewardEngine::new(RewardTable::nusantara().unwrap());
    let counts = tier_counts(&engine, 777, DRAWS);

    let legendary = counts[&RarityTier::Legendary] as f64 / DRAWS as f64;
    let common = counts[&RarityTier::Common] as f64 / DRAWS as f64;
    assert!((legendary - 0.05).abs() < 0.005, "legendary rate {legendary}");
    assert!((common - 0.70).abs() < 0.01, "common rate {common}");
}

#[test]
fn test_every_draw_lands_in_exactly_one_tier() {
    let engine = RewardEngine::new(RewardTable::reference().unwrap());
    let counts = tier_counts(&engine, 1, 10_000);
    assert_eq!(counts.values().sum::<u64>(), 10_000);
}

// ============================================================================
// Within-Tier Uniformity
// ============================================================================

#[test]
fn test_items_within_tier_are_uniform() {
    let table = RewardTable::nusantara().unwrap();
    let engine = RewardEngine::new(table.clone());
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    let mut per_item: HashMap<String, u64> = HashMap::new();
    for _ in 0..DRAWS {
        *per_item.entry(engine.draw(&mut rng).name.clone()).or_insert(0) += 1;
    }

    let common = table.tier(RarityTier::Common).unwrap();
    let tier_total: u64 = common.items.iter().map(|i| per_item[&i.name]).sum();
    let expected = tier_total as f64 / common.items.len() as f64;
    let pairs: Vec<(u64, f64)> = common
        .items
        .iter()
        .map(|i| (per_item[&i.name], expected))
        .collect();

    assert!(chi_squared(&pairs) < CRITICAL_DF2, "{per_item:?}");
}

// ============================================================================
// Simulator
// ============================================================================

#[test]
fn test_simulator_passes_on_builtin_tables() {
    for table in ["reference", "nusantara"] {
        let report = run_simulation(&SimConfig {
            draws: DRAWS,
            seed: Some(99),
            table: table.to_string(),
        })
        .unwrap();
        assert!(report.passed, "{}", report.to_text());
        assert_eq!(
            report.tiers.iter().map(|t| t.observed).sum::<u64>(),
            DRAWS
        );
    }
}
