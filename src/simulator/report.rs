//! Simulation report generation.

use crate::constants::{CHI_SQUARED_CRITICAL_DF1, CHI_SQUARED_CRITICAL_DF2};
use crate::reward::{RarityTier, RewardTable};
use serde::Serialize;
use std::collections::HashMap;

/// Observed vs expected draws for one tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierTally {
    pub tier: RarityTier,
    pub weight: f64,
    pub expected: f64,
    pub observed: u64,
}

impl TierTally {
    pub fn observed_rate(&self, total: u64) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.observed as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemTally {
    pub name: String,
    pub tier: RarityTier,
    pub count: u64,
}

/// Aggregated results of one simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub table: String,
    pub seed: Option<u64>,
    pub total_draws: u64,
    pub tiers: Vec<TierTally>,
    pub items: Vec<ItemTally>,
    pub chi_squared: f64,
    pub degrees_of_freedom: usize,
    /// Critical value at p = 0.001; `None` when there is nothing to test
    pub critical_value: Option<f64>,
    pub passed: bool,
}

/// Pearson's statistic over `(observed, expected)` pairs. Pairs with no
/// expectation are skipped.
pub fn chi_squared(pairs: &[(u64, f64)]) -> f64 {
    pairs
        .iter()
        .filter(|(_, expected)| *expected > 0.0)
        .map(|(observed, expected)| {
            let diff = *observed as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

/// Critical value at p = 0.001 for the tier counts this game supports.
pub fn critical_value(degrees_of_freedom: usize) -> Option<f64> {
    match degrees_of_freedom {
        1 => Some(CHI_SQUARED_CRITICAL_DF1),
        2 => Some(CHI_SQUARED_CRITICAL_DF2),
        _ => None,
    }
}

impl SimReport {
    /// Builds the report from per-item draw counts.
    pub fn from_counts(
        table: &RewardTable,
        table_name: &str,
        seed: Option<u64>,
        total_draws: u64,
        counts: &HashMap<String, u64>,
    ) -> Self {
        let items: Vec<ItemTally> = table
            .entries()
            .map(|entry| ItemTally {
                name: entry.name.clone(),
                tier: entry.rarity,
                count: counts.get(&entry.name).copied().unwrap_or(0),
            })
            .collect();

        let tiers: Vec<TierTally> = table
            .tiers()
            .iter()
            .map(|group| TierTally {
                tier: group.tier,
                weight: group.weight,
                expected: group.weight * total_draws as f64,
                observed: items
                    .iter()
                    .filter(|item| item.tier == group.tier)
                    .map(|item| item.count)
                    .sum(),
            })
            .collect();

        let pairs: Vec<(u64, f64)> = tiers.iter().map(|t| (t.observed, t.expected)).collect();
        let chi_squared = chi_squared(&pairs);
        let degrees_of_freedom = tiers.len().saturating_sub(1);
        let critical_value = critical_value(degrees_of_freedom);
        let passed = critical_value.map_or(true, |critical| chi_squared < critical);

        Self {
            table: table_name.to_string(),
            seed,
            total_draws,
            tiers,
            items,
            chi_squared,
            degrees_of_freedom,
            critical_value,
            passed,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    DRAW SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Table: {}   Draws: {}   Seed: {}\n\n",
            self.table,
            self.total_draws,
            self.seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "random".to_string())
        ));

        report.push_str("── TIERS ────────────────────────────────────────────────────────\n");
        report.push_str("  Tier         Expected   Observed   Rate     Target\n");
        report.push_str("  ────         ────────   ────────   ────     ──────\n");
        for tally in &self.tiers {
            report.push_str(&format!(
                "  {:<10} {:>10.0} {:>10} {:>7.2}% {:>7.2}%\n",
                tally.tier.label(),
                tally.expected,
                tally.observed,
                tally.observed_rate(self.total_draws) * 100.0,
                tally.weight * 100.0
            ));
        }
        report.push('\n');

        report.push_str("── CATCHES ──────────────────────────────────────────────────────\n");
        for item in &self.items {
            let pct = if self.total_draws == 0 {
                0.0
            } else {
                item.count as f64 / self.total_draws as f64 * 100.0
            };
            let bar = "█".repeat((pct / 2.5) as usize);
            report.push_str(&format!(
                "  {:<16} {:<10} {:>8} {:>6.2}% {}\n",
                item.name,
                item.tier.label(),
                item.count,
                pct,
                bar
            ));
        }
        report.push('\n');

        report.push_str("── GOODNESS OF FIT ──────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Chi-squared: {:.3} (df = {})\n",
            self.chi_squared, self.degrees_of_freedom
        ));
        match self.critical_value {
            Some(critical) => report.push_str(&format!(
                "  Critical value (p = 0.001): {:.3}\n",
                critical
            )),
            None => report.push_str("  Critical value: n/a\n"),
        }
        report.push_str(if self.passed {
            "  Verdict: PASS - draws match the configured weights\n"
        } else {
            "  Verdict: FAIL - draws deviate from the configured weights\n"
        });

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
