//! Session state and round events.

use crate::error::PresentationError;
use crate::reward::RewardDefinition;
use crate::stats::PlayerStatistics;
use std::fmt;

/// Identifies one started round. Increases by one per `start_round`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoundId(pub u64);

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the current round is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the player to fish
    Idle,
    /// Cast animation running; the outcome is not drawn yet
    Presenting,
    /// Reward drawn, recorded and shown
    Resolved,
}

/// The current round. Only the session controller mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub last_result: Option<RewardDefinition>,
    /// Round currently presenting or most recently started.
    pub round: Option<RoundId>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            last_result: None,
            round: None,
        }
    }
}

/// Delivered to resolved-round listeners after statistics are recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    pub round: RoundId,
    pub reward: RewardDefinition,
    pub statistics: PlayerStatistics,
    /// False when the statistics could not be written; play continues anyway.
    pub saved: bool,
}

/// How a presentation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalKind {
    Complete,
    Failed(PresentationError),
}

/// Completion signal from the presentation collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationSignal {
    pub round: RoundId,
    pub kind: SignalKind,
}

impl PresentationSignal {
    pub fn complete(round: RoundId) -> Self {
        Self {
            round,
            kind: SignalKind::Complete,
        }
    }

    pub fn failed(round: RoundId, error: PresentationError) -> Self {
        Self {
            round,
            kind: SignalKind::Failed(error),
        }
    }
}

/// Result of every controller operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    /// Idle -> Presenting
    Started(RoundId),
    /// Request not valid in the current phase; nothing changed
    Ignored { phase: SessionPhase },
    /// Presenting -> Resolved
    Resolved(RoundOutcome),
    /// Presenting -> Idle without touching statistics
    Aborted {
        round: RoundId,
        error: PresentationError,
    },
    /// Resolved -> Idle
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_state_starts_idle() {
        let state = SessionState::default();
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(state.last_result.is_none());
        assert!(state.round.is_none());
    }

    #[test]
    fn test_round_id_display() {
        assert_eq!(RoundId(7).to_string(), "#7");
    }

    #[test]
    fn test_signal_constructors() {
        let done = PresentationSignal::complete(RoundId(1));
        assert_eq!(done.kind, SignalKind::Complete);

        let failed =
            PresentationSignal::failed(RoundId(2), PresentationError::Interrupted("x".into()));
        assert_eq!(failed.round, RoundId(2));
        assert!(matches!(failed.kind, SignalKind::Failed(_)));
    }
}
