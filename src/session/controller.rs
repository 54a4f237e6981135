//! Round lifecycle and the only writer of player statistics.
//!
//! ```text
//! Idle --start--> Presenting --complete--> Resolved --reset--> Idle
//!                      |
//!                      +------failed-----> Idle (statistics untouched)
//! ```
//!
//! A start request while presenting is ignored. Signals that do not belong to
//! the presenting round are ignored, so a duplicate completion can never
//! record a catch twice.

use super::presentation::Presenter;
use super::types::{
    PresentationSignal, RoundEvent, RoundId, RoundOutcome, SessionPhase, SessionState,
    SignalKind,
};
use crate::error::{PresentationError, ShareError};
use crate::reward::{RandomSource, RewardDefinition, RewardEngine};
use crate::share::{ShareRequest, ShareTarget};
use crate::stats::{record, KeyValueStorage, PlayerStatistics, StatisticsStore};

type ResolvedListener = Box<dyn FnMut(&RoundOutcome)>;

/// Owns the session state, the statistics and every collaborator.
pub struct SessionController<S: KeyValueStorage, R: RandomSource, P: Presenter> {
    engine: RewardEngine,
    store: StatisticsStore<S>,
    statistics: PlayerStatistics,
    state: SessionState,
    rng: R,
    presenter: P,
    next_round: u64,
    listeners: Vec<ResolvedListener>,
}

impl<S: KeyValueStorage, R: RandomSource, P: Presenter> SessionController<S, R, P> {
    /// Creates an idle session, loading statistics from `store` (zeros on failure).
    pub fn new(engine: RewardEngine, store: StatisticsStore<S>, rng: R, presenter: P) -> Self {
        let statistics = store.load();
        log::info!(
            "Session started: {} catches, {} tokens",
            statistics.total_catches,
            statistics.total_tokens
        );
        Self {
            engine,
            store,
            statistics,
            state: SessionState::default(),
            rng,
            presenter,
            next_round: 1,
            listeners: Vec::new(),
        }
    }

    /// Starts a round: Idle (or Resolved) -> Presenting.
    ///
    /// Ignored while a round is presenting. Starting from Resolved clears the
    /// previous result first. A presenter that refuses to start aborts the
    /// round back to Idle.
    pub fn start_round(&mut self) -> RoundEvent {
        match self.state.phase {
            SessionPhase::Presenting => {
                log::debug!("Start ignored: round already presenting");
                return RoundEvent::Ignored {
                    phase: SessionPhase::Presenting,
                };
            }
            SessionPhase::Resolved => {
                self.state.last_result = None;
            }
            SessionPhase::Idle => {}
        }

        let round = RoundId(self.next_round);
        self.next_round += 1;
        self.state.round = Some(round);
        self.state.phase = SessionPhase::Presenting;

        if let Err(error) = self.presenter.present(round) {
            log::warn!("Presentation for round {} failed to start: {}", round, error);
            self.state.phase = SessionPhase::Idle;
            return RoundEvent::Aborted { round, error };
        }

        log::debug!("Round {} presenting", round);
        RoundEvent::Started(round)
    }

    /// Routes a presentation signal to the matching transition.
    pub fn handle_signal(&mut self, signal: PresentationSignal) -> RoundEvent {
        match signal.kind {
            SignalKind::Complete => self.complete_presentation(signal.round),
            SignalKind::Failed(error) => self.fail_presentation(signal.round, error),
        }
    }

    /// Presenting -> Resolved: draw, record, save, then notify.
    pub fn complete_presentation(&mut self, round: RoundId) -> RoundEvent {
        if !self.is_presenting(round) {
            log::debug!("Completion for round {} ignored", round);
            return RoundEvent::Ignored {
                phase: self.state.phase,
            };
        }

        let reward = self.engine.draw(&mut self.rng).clone();
        let statistics = record(&reward, self.statistics);
        self.statistics = statistics;
        let saved = self.store.save(&statistics);

        self.state.phase = SessionPhase::Resolved;
        self.state.last_result = Some(reward.clone());

        log::info!(
            "Round {} caught {} [{}] +{} tokens",
            round,
            reward.name,
            reward.rarity,
            reward.token_reward
        );

        let outcome = RoundOutcome {
            round,
            reward,
            statistics,
            saved,
        };
        for listener in self.listeners.iter_mut() {
            listener(&outcome);
        }
        RoundEvent::Resolved(outcome)
    }

    /// Presenting -> Idle. Statistics are not touched.
    pub fn fail_presentation(&mut self, round: RoundId, error: PresentationError) -> RoundEvent {
        if !self.is_presenting(round) {
            log::debug!("Failure for round {} ignored", round);
            return RoundEvent::Ignored {
                phase: self.state.phase,
            };
        }

        log::warn!("Round {} aborted: {}", round, error);
        self.state.phase = SessionPhase::Idle;
        self.state.last_result = None;
        RoundEvent::Aborted { round, error }
    }

    /// Resolved -> Idle, clearing the last result.
    pub fn reset_round(&mut self) -> RoundEvent {
        if self.state.phase != SessionPhase::Resolved {
            return RoundEvent::Ignored {
                phase: self.state.phase,
            };
        }
        self.state.phase = SessionPhase::Idle;
        self.state.last_result = None;
        RoundEvent::Reset
    }

    /// Registers a listener called after each resolved round, once the
    /// statistics have been recorded and saved.
    pub fn on_round_resolved(&mut self, listener: impl FnMut(&RoundOutcome) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Post for the last resolved round.
    pub fn share_request(&self, embed_url: Option<&str>) -> Result<ShareRequest, ShareError> {
        match (&self.state.phase, &self.state.last_result) {
            (SessionPhase::Resolved, Some(reward)) => {
                Ok(ShareRequest::for_reward(reward, embed_url))
            }
            _ => Err(ShareError::NothingToShare),
        }
    }

    /// Shares the last resolved round. Never changes session state.
    pub fn share(
        &self,
        target: &mut impl ShareTarget,
        embed_url: Option<&str>,
    ) -> Result<(), ShareError> {
        let request = self.share_request(embed_url)?;
        target.compose(&request).map_err(|e| {
            log::warn!("Share failed: {}", e);
            e
        })
    }

    /// Snapshot of the player statistics.
    pub fn statistics(&self) -> PlayerStatistics {
        self.statistics
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn last_result(&self) -> Option<&RewardDefinition> {
        self.state.last_result.as_ref()
    }

    pub fn engine(&self) -> &RewardEngine {
        &self.engine
    }

    pub fn store(&self) -> &StatisticsStore<S> {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The host loop polls the presenter through this for completion signals.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    fn is_presenting(&self, round: RoundId) -> bool {
        self.state.phase == SessionPhase::Presenting && self.state.round == Some(round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STORAGE_KEY;
    use crate::reward::{RarityTier, RewardTable, ScriptedRandom};
    use crate::share::MemoryShareTarget;
    use crate::stats::MemoryStorage;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every present call; optionally refuses to start.
    #[derive(Default)]
    struct RecordingPresenter {
        started: Vec<RoundId>,
        refuse: bool,
    }

    impl Presenter for RecordingPresenter {
        fn present(&mut self, round: RoundId) -> Result<(), PresentationError> {
            if self.refuse {
                return Err(PresentationError::Interrupted("canvas missing".into()));
            }
            self.started.push(round);
            Ok(())
        }
    }

    type TestController = SessionController<MemoryStorage, ScriptedRandom, RecordingPresenter>;

    fn controller_with(storage: MemoryStorage, samples: Vec<f64>) -> TestController {
        SessionController::new(
            RewardEngine::new(RewardTable::reference().unwrap()),
            StatisticsStore::new(storage),
            ScriptedRandom::new(samples),
            RecordingPresenter::default(),
        )
    }

    fn started_round(event: RoundEvent) -> RoundId {
        match event {
            RoundEvent::Started(round) => round,
            other => panic!("expected Started, got {:?}", other),
        }
    }

    #[test]
    fn test_new_session_loads_statistics() {
        let storage =
            MemoryStorage::new().with_value(STORAGE_KEY, r#"{"totalCatches":3,"totalTokens":15}"#);
        let controller = controller_with(storage, vec![0.1]);
        assert_eq!(controller.statistics(), PlayerStatistics::new(3, 15));
        assert_eq!(controller.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_full_round_records_and_saves_once() {
        let mut controller = controller_with(MemoryStorage::new(), vec![0.97]);

        let round = started_round(controller.start_round());
        assert_eq!(controller.phase(), SessionPhase::Presenting);
        assert_eq!(controller.presenter().started, vec![round]);

        let event = controller.complete_presentation(round);
        let RoundEvent::Resolved(outcome) = event else {
            panic!("expected Resolved");
        };
        assert_eq!(outcome.reward.rarity, RarityTier::Legendary);
        assert_eq!(outcome.statistics, PlayerStatistics::new(1, 50));
        assert!(outcome.saved);
        assert_eq!(controller.phase(), SessionPhase::Resolved);
        assert_eq!(controller.store().storage().writes(), 1);
    }

    #[test]
    fn test_start_while_presenting_is_ignored() {
        let mut controller = controller_with(MemoryStorage::new(), vec![0.1]);
        let round = started_round(controller.start_round());

        assert_eq!(
            controller.start_round(),
            RoundEvent::Ignored {
                phase: SessionPhase::Presenting
            }
        );
        assert_eq!(controller.presenter().started.len(), 1);
        assert_eq!(controller.state().round, Some(round));
        assert_eq!(controller.statistics(), PlayerStatistics::default());
    }

    #[test]
    fn test_duplicate_completion_is_ignored() {
        let mut controller = controller_with(MemoryStorage::new(), vec![0.1]);
        let round = started_round(controller.start_round());

        assert!(matches!(
            controller.complete_presentation(round),
            RoundEvent::Resolved(_)
        ));
        assert_eq!(
            controller.complete_presentation(round),
            RoundEvent::Ignored {
                phase: SessionPhase::Resolved
            }
        );
        assert_eq!(controller.statistics().total_catches, 1);
        assert_eq!(controller.store().storage().writes(), 1);
    }

    #[test]
    fn test_signal_for_other_round_is_ignored() {
        let mut controller = controller_with(MemoryStorage::new(), vec![0.1]);
        let round = started_round(controller.start_round());

        let stale = RoundId(round.0 + 10);
        assert!(matches!(
            controller.handle_signal(PresentationSignal::complete(stale)),
            RoundEvent::Ignored { .. }
        ));
        assert_eq!(controller.phase(), SessionPhase::Presenting);
    }

    #[test]
    fn test_signal_while_idle_is_ignored() {
        let mut controller = controller_with(MemoryStorage::new(), vec![0.1]);
        assert_eq!(
            controller.complete_presentation(RoundId(1)),
            RoundEvent::Ignored {
                phase: SessionPhase::Idle
            }
        );
        assert_eq!(controller.statistics(), PlayerStatistics::default());
    }

    #[test]
    fn test_failed_presentation_returns_to_idle_without_recording() {
        let storage =
            MemoryStorage::new().with_value(STORAGE_KEY, r#"{"totalCatches":4,"totalTokens":5}"#);
        let mut controller = controller_with(storage, vec![0.97]);
        let round = started_round(controller.start_round());

        let event = controller.handle_signal(PresentationSignal::failed(
            round,
            PresentationError::Interrupted("window closed".into()),
        ));
        assert!(matches!(event, RoundEvent::Aborted { .. }));
        assert_eq!(controller.phase(), SessionPhase::Idle);
        assert_eq!(controller.statistics(), PlayerStatistics::new(4, 5));
        assert_eq!(controller.store().storage().writes(), 0);

        // Retry works immediately
        assert!(matches!(controller.start_round(), RoundEvent::Started(_)));
    }

    #[test]
    fn test_presenter_refusing_to_start_aborts_round() {
        let mut controller = SessionController::new(
            RewardEngine::new(RewardTable::reference().unwrap()),
            StatisticsStore::new(MemoryStorage::new()),
            ScriptedRandom::new(vec![0.1]),
            RecordingPresenter {
                refuse: true,
                ..Default::default()
            },
        );
        assert!(matches!(
            controller.start_round(),
            RoundEvent::Aborted { .. }
        ));
        assert_eq!(controller.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_reset_only_from_resolved() {
        let mut controller = controller_with(MemoryStorage::new(), vec![0.1]);
        assert!(matches!(
            controller.reset_round(),
            RoundEvent::Ignored { .. }
        ));

        let round = started_round(controller.start_round());
        assert!(matches!(
            controller.reset_round(),
            RoundEvent::Ignored {
                phase: SessionPhase::Presenting
            }
        ));

        controller.complete_presentation(round);
        let before = controller.statistics();
        assert_eq!(controller.reset_round(), RoundEvent::Reset);
        assert_eq!(controller.phase(), SessionPhase::Idle);
        assert!(controller.last_result().is_none());
        assert_eq!(controller.statistics(), before);
    }

    #[test]
    fn test_start_from_resolved_clears_previous_result() {
        let mut controller = controller_with(MemoryStorage::new(), vec![0.1]);
        let first = started_round(controller.start_round());
        controller.complete_presentation(first);

        let second = started_round(controller.start_round());
        assert!(second > first);
        assert!(controller.last_result().is_none());
        assert_eq!(controller.phase(), SessionPhase::Presenting);
    }

    #[test]
    fn test_listener_sees_recorded_statistics() {
        let mut controller = controller_with(MemoryStorage::new(), vec![0.8]);
        let seen: Rc<RefCell<Vec<RoundOutcome>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        controller.on_round_resolved(move |outcome| sink.borrow_mut().push(outcome.clone()));

        let round = started_round(controller.start_round());
        controller.complete_presentation(round);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].reward.rarity, RarityTier::Rare);
        assert_eq!(seen[0].statistics, PlayerStatistics::new(1, 5));
    }

    #[test]
    fn test_save_failure_does_not_block_play() {
        let mut controller = controller_with(MemoryStorage::unavailable(), vec![0.97]);
        let round = started_round(controller.start_round());

        let RoundEvent::Resolved(outcome) = controller.complete_presentation(round) else {
            panic!("expected Resolved");
        };
        assert!(!outcome.saved);
        assert_eq!(controller.statistics(), PlayerStatistics::new(1, 50));
    }

    #[test]
    fn test_share_requires_resolved_round() {
        let mut controller = controller_with(MemoryStorage::new(), vec![0.97]);
        let mut target = MemoryShareTarget::default();

        assert!(matches!(
            controller.share(&mut target, None),
            Err(ShareError::NothingToShare)
        ));

        let round = started_round(controller.start_round());
        controller.complete_presentation(round);
        controller.share(&mut target, Some("https://example.test")).unwrap();
        assert_eq!(target.sent.len(), 1);
        assert!(target.sent[0].text.contains("LEGENDARY"));
        assert_eq!(target.sent[0].embeds, vec!["https://example.test".to_string()]);
    }

    #[test]
    fn test_share_failure_keeps_state() {
        let mut controller = controller_with(MemoryStorage::new(), vec![0.1]);
        let round = started_round(controller.start_round());
        controller.complete_presentation(round);

        let mut target = MemoryShareTarget {
            reject_with: Some("feed offline".into()),
            ..Default::default()
        };
        assert!(controller.share(&mut target, None).is_err());
        assert_eq!(controller.phase(), SessionPhase::Resolved);
        assert!(controller.last_result().is_some());
    }
}
