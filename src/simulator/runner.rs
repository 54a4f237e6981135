//! Simulation runner. Every draw goes through the real [`RewardEngine`].

use super::config::SimConfig;
use super::report::SimReport;
use crate::error::Result;
use crate::reward::{RandomSource, RewardEngine, RewardTable};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

/// Run the simulation described by `config` and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport> {
    let table = RewardTable::by_name(&config.table)?;
    let engine = RewardEngine::new(table);

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    log::info!(
        "Simulating {} draws from the '{}' table",
        config.draws,
        config.table
    );
    let counts = simulate_draws(&engine, &mut rng, config.draws);
    Ok(SimReport::from_counts(
        engine.table(),
        &config.table,
        config.seed,
        config.draws,
        &counts,
    ))
}

/// Draws `draws` rewards and counts them by name.
pub fn simulate_draws(
    engine: &RewardEngine,
    rng: &mut impl RandomSource,
    draws: u64,
) -> HashMap<String, u64> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for _ in 0..draws {
        let reward = engine.draw(rng);
        *counts.entry(reward.name.clone()).or_insert(0) += 1;
    }
    counts
}
