//! Spinner and idle flavor lines for the fishing scene.

use std::time::{SystemTime, UNIX_EPOCH};

/// Braille spinner characters for animated loading indicators.
const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Shown on the calm water between rounds.
const IDLE_MESSAGES: [&str; 8] = [
    "The lake is calm...",
    "Ripples in the distance...",
    "Something glints below...",
    "A good day for fishing...",
    "The fish are hungry...",
    "Reeds sway in the breeze...",
    "Fortune favors the patient...",
    "Bubbles rise to the surface...",
];

fn current_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// The spinner cycles every 100ms, completing a full rotation every second.
pub fn spinner_char() -> char {
    spinner_at(current_millis())
}

fn spinner_at(millis: u128) -> char {
    SPINNER[((millis / 100) % SPINNER.len() as u128) as usize]
}

/// Stable for the same seed, changing only when the seed changes.
pub fn idle_message(seed: u64) -> &'static str {
    IDLE_MESSAGES[(seed.wrapping_mul(7) as usize) % IDLE_MESSAGES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_cycles_every_second() {
        assert_eq!(spinner_at(0), '⠋');
        assert_eq!(spinner_at(100), '⠙');
        assert_eq!(spinner_at(1000), spinner_at(0));
    }

    #[test]
    fn test_idle_message_is_stable_per_seed() {
        assert_eq!(idle_message(3), idle_message(3));
        assert_ne!(idle_message(0), idle_message(1));
    }
}
