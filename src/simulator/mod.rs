//! Monte Carlo draw simulator.
//!
//! Draws a large number of rewards from a table with a seeded RNG and checks
//! the observed tier frequencies against the configured weights with a
//! chi-squared goodness-of-fit test. The draws go through [`RewardEngine`],
//! so results match real gameplay behavior.
//!
//! [`RewardEngine`]: crate::reward::RewardEngine

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{chi_squared, critical_value, ItemTally, SimReport, TierTally};
pub use runner::{run_simulation, simulate_draws};
