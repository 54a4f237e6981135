//! Simulation configuration.

use crate::constants::{
    DEFAULT_SIMULATION_DRAWS, QUICK_SIMULATION_DRAWS, QUICK_SIMULATION_SEED,
};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Number of rewards to draw
    pub draws: u64,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Built-in table name (`reference` or `nusantara`)
    pub table: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            draws: DEFAULT_SIMULATION_DRAWS,
            seed: None,
            table: "reference".to_string(),
        }
    }
}

impl SimConfig {
    /// Quick seeded check, used by `--quick`. Keeps the table and any seed
    /// already chosen.
    pub fn quick(mut self) -> Self {
        self.draws = QUICK_SIMULATION_DRAWS;
        self.seed.get_or_insert(QUICK_SIMULATION_SEED);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.draws, 100_000);
        assert_eq!(config.seed, None);
        assert_eq!(config.table, "reference");
    }

    #[test]
    fn test_quick_config_is_seeded() {
        let config = SimConfig::default().quick();
        assert_eq!(config.seed, Some(42));
        assert!(config.draws < SimConfig::default().draws);
    }

    #[test]
    fn test_quick_keeps_table_and_seed() {
        let config = SimConfig {
            seed: Some(7),
            table: "nusantara".to_string(),
            ..SimConfig::default()
        }
        .quick();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.table, "nusantara");
        assert_eq!(config.draws, 10_000);
    }
}
