//! Presentation collaborator: the timed cast animation played before a reward
//! is revealed.
//!
//! # Stages (reference duration 2s)
//! 1. **Casting** (first 30%) - line drops toward the water
//! 2. **Waiting** (30%-90%) - hook sits in the water
//! 3. **Biting** (last 10%) - fish takes the hook

use super::types::{PresentationSignal, RoundId};
use crate::constants::{PRESENTATION_BITE_START, PRESENTATION_CAST_END, PRESENTATION_DURATION_MS};
use crate::error::PresentationError;
use std::time::{Duration, Instant};

/// Starts a bounded presentation for a round.
///
/// Completion is not returned here: the host delivers exactly one
/// [`PresentationSignal`] to the controller later.
pub trait Presenter {
    fn present(&mut self, round: RoundId) -> Result<(), PresentationError>;
}

/// Visual stage of a running presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationStage {
    Casting,
    Waiting,
    Biting,
}

#[derive(Debug, Clone, Copy)]
struct ActivePresentation {
    round: RoundId,
    started: Instant,
}

/// Wall-clock presenter polled by the host loop.
#[derive(Debug, Clone)]
pub struct TimedPresentation {
    duration: Duration,
    active: Option<ActivePresentation>,
}

impl Default for TimedPresentation {
    fn default() -> Self {
        Self::new(Duration::from_millis(PRESENTATION_DURATION_MS))
    }
}

impl TimedPresentation {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            active: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn current_round(&self) -> Option<RoundId> {
        self.active.map(|a| a.round)
    }

    /// Starts a presentation with an explicit clock.
    pub fn start_at(&mut self, round: RoundId, now: Instant) -> Result<(), PresentationError> {
        if let Some(active) = self.active {
            return Err(PresentationError::Busy(active.round.0));
        }
        self.active = Some(ActivePresentation {
            round,
            started: now,
        });
        Ok(())
    }

    /// Emits the completion signal once the duration has elapsed.
    ///
    /// Returns `Some` exactly once per started presentation.
    pub fn poll(&mut self, now: Instant) -> Option<PresentationSignal> {
        let active = self.active?;
        if now.saturating_duration_since(active.started) < self.duration {
            return None;
        }
        self.active = None;
        Some(PresentationSignal::complete(active.round))
    }

    /// Stops a running presentation and emits its failure signal.
    pub fn interrupt(&mut self, reason: &str) -> Option<PresentationSignal> {
        let active = self.active.take()?;
        Some(PresentationSignal::failed(
            active.round,
            PresentationError::Interrupted(reason.to_string()),
        ))
    }

    /// Fraction of the duration elapsed, in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> Option<f64> {
        let active = self.active?;
        if self.duration.is_zero() {
            return Some(1.0);
        }
        let elapsed = now.saturating_duration_since(active.started);
        Some((elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0))
    }

    pub fn stage(&self, now: Instant) -> Option<PresentationStage> {
        let progress = self.progress(now)?;
        Some(if progress < PRESENTATION_CAST_END {
            PresentationStage::Casting
        } else if progress < PRESENTATION_BITE_START {
            PresentationStage::Waiting
        } else {
            PresentationStage::Biting
        })
    }
}

impl Presenter for TimedPresentation {
    fn present(&mut self, round: RoundId) -> Result<(), PresentationError> {
        self.start_at(round, Instant::now())
    }
}
