// Terminal loop timing
pub const INPUT_POLL_MS: u64 = 50;

// Presentation (cast -> wait -> bite) timing
pub const PRESENTATION_DURATION_MS: u64 = 2000;
pub const PRESENTATION_CAST_END: f64 = 0.3; // line reaches the water
pub const PRESENTATION_BITE_START: f64 = 0.9; // fish takes the hook

// Reward table validation
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

// Persistence
pub const DATA_DIR_NAME: &str = ".fishy-fortune";
pub const STORAGE_KEY: &str = "fishy-fortune-state";
pub const CONFIG_FILENAME: &str = "config.json";
pub const SHARE_OUTBOX_FILENAME: &str = "shares.jsonl";
pub const LOG_FILENAME: &str = "fishy-fortune.log";

// Identity lookup retry
pub const IDENTITY_MAX_ATTEMPTS: u32 = 5;
pub const IDENTITY_INITIAL_DELAY_MS: u64 = 500;
pub const IDENTITY_BACKOFF_MULTIPLIER: u32 = 2;
pub const IDENTITY_MAX_DELAY_MS: u64 = 4000;

// Simulator
pub const DEFAULT_SIMULATION_DRAWS: u64 = 100_000;

/// Draws for `simulate --quick`
pub const QUICK_SIMULATION_DRAWS: u64 = 10_000;

/// Seed for `simulate --quick` when none is given
pub const QUICK_SIMULATION_SEED: u64 = 42;

// Chi-squared critical values at p = 0.001
pub const CHI_SQUARED_CRITICAL_DF1: f64 = 10.828;
pub const CHI_SQUARED_CRITICAL_DF2: f64 = 13.816;

pub const GAME_TITLE: &str = "Fishy Fortune";
