//! Phase controller
//!
//! Owns the current [`Phase`], the running flag, the latest
//! [`AnalysisResult`] and a monotonic run generation. Every mutation is
//! broadcast as a [`PhaseSnapshot`] over a watch channel; scene renderers and
//! ancillary observers subscribe to that channel and never write back.
//!
//! The generation counter resolves the stale-response race: each run captures
//! the generation it started under, and any transition or analysis write whose
//! captured generation no longer matches is discarded.

use crate::error::EngineError;
use circuverse_model::{AnalysisResult, Phase};
use parking_lot::Mutex;
use tokio::sync::watch;

/// Point-in-time view of the controller, broadcast to all observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseSnapshot {
    /// Current narrative phase
    pub phase: Phase,
    /// Whether an automated run is in progress
    pub running: bool,
    /// Run generation the snapshot belongs to
    pub generation: u64,
}

#[derive(Debug, Default)]
struct ControllerState {
    phase: Phase,
    running: bool,
    generation: u64,
    analysis: Option<AnalysisResult>,
}

impl ControllerState {
    fn snapshot(&self) -> PhaseSnapshot {
        PhaseSnapshot {
            phase: self.phase,
            running: self.running,
            generation: self.generation,
        }
    }
}

/// State machine owning phase, run flag and the latest analysis
#[derive(Debug)]
pub struct PhaseController {
    state: Mutex<ControllerState>,
    tx: watch::Sender<PhaseSnapshot>,
}

impl PhaseController {
    /// Create an idle controller at [`Phase::PollutedCity`]
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(PhaseSnapshot::default());
        Self {
            state: Mutex::new(ControllerState::default()),
            tx,
        }
    }

    /// Subscribe to phase snapshots
    ///
    /// The receiver immediately holds the current snapshot. Watch semantics
    /// apply: a slow reader observes the latest value, not every intermediate
    /// one.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PhaseSnapshot> {
        self.tx.subscribe()
    }

    /// Current snapshot
    #[must_use]
    pub fn snapshot(&self) -> PhaseSnapshot {
        self.state.lock().snapshot()
    }

    /// Current phase
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.lock().phase
    }

    /// Whether an automated run is in progress
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    /// Current run generation
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// Latest analysis result, if any
    #[must_use]
    pub fn analysis(&self) -> Option<AnalysisResult> {
        self.state.lock().analysis.clone()
    }

    /// Select a phase directly (phase-indicator click)
    ///
    /// Accepted only while idle; returns `false` (and leaves the phase
    /// unchanged) while a run is in progress.
    pub fn set_phase(&self, phase: Phase) -> bool {
        let mut state = self.state.lock();
        if state.running {
            tracing::debug!(%phase, "set_phase rejected: run in progress");
            return false;
        }
        state.phase = phase;
        self.tx.send_replace(state.snapshot());
        true
    }

    /// Force idle at phase 0 and clear the stored analysis
    ///
    /// Bumps the generation so any in-flight run (and its eventual analysis
    /// write) is superseded. Idempotent apart from the generation bump.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.phase = Phase::PollutedCity;
        state.running = false;
        state.generation += 1;
        state.analysis = None;
        tracing::info!(generation = state.generation, "controller reset");
        self.tx.send_replace(state.snapshot());
    }

    /// Begin an automated run; returns the generation the run must carry
    pub(crate) fn begin_run(&self) -> Result<u64, EngineError> {
        let mut state = self.state.lock();
        if state.running {
            return Err(EngineError::RunInProgress);
        }
        state.running = true;
        state.phase = Phase::PollutedCity;
        state.generation += 1;
        self.tx.send_replace(state.snapshot());
        Ok(state.generation)
    }

    /// Advance a running sequence to `phase`
    ///
    /// Fails with [`EngineError::Superseded`] when `generation` is stale.
    pub(crate) fn advance(&self, generation: u64, phase: Phase) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        if state.generation != generation {
            return Err(EngineError::Superseded {
                stale: generation,
                current: state.generation,
            });
        }
        state.phase = phase;
        self.tx.send_replace(state.snapshot());
        Ok(())
    }

    /// Store an analysis result; discarded when `generation` is stale
    pub(crate) fn store_analysis(&self, generation: u64, analysis: AnalysisResult) -> bool {
        let mut state = self.state.lock();
        if state.generation != generation {
            tracing::warn!(
                stale = generation,
                current = state.generation,
                "discarding stale analysis response"
            );
            return false;
        }
        state.analysis = Some(analysis);
        true
    }

    /// Mark a running sequence finished; no-op when `generation` is stale
    pub(crate) fn finish_run(&self, generation: u64) {
        let mut state = self.state.lock();
        if state.generation != generation {
            return;
        }
        state.running = false;
        self.tx.send_replace(state.snapshot());
    }
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuverse_model::RawAnalysis;
    use pretty_assertions::assert_eq;

    #[test]
    fn controller_starts_idle_at_phase_zero() {
        let controller = PhaseController::new();
        let snap = controller.snapshot();

        assert_eq!(snap.phase, Phase::PollutedCity);
        assert!(!snap.running);
        assert!(controller.analysis().is_none());
    }

    #[test]
    fn set_phase_last_value_wins_while_idle() {
        let controller = PhaseController::new();
        for target in [Phase::Build, Phase::AiScan, Phase::Sustainable] {
            assert!(controller.set_phase(target));
            assert_eq!(controller.phase(), target);
        }
    }

    #[test]
    fn set_phase_rejected_while_running() {
        let controller = PhaseController::new();
        controller.begin_run().unwrap();

        assert!(!controller.set_phase(Phase::Build));
        assert_eq!(controller.phase(), Phase::PollutedCity);
    }

    #[test]
    fn begin_run_guards_reentry() {
        let controller = PhaseController::new();
        controller.begin_run().unwrap();

        assert!(matches!(controller.begin_run(), Err(EngineError::RunInProgress)));
    }

    #[test]
    fn reset_clears_everything_and_is_idempotent() {
        let controller = PhaseController::new();
        let generation = controller.begin_run().unwrap();
        controller.advance(generation, Phase::Transform).unwrap();
        controller.store_analysis(generation, RawAnalysis::default().normalize());

        controller.reset();
        let first = controller.snapshot();
        controller.reset();
        let second = controller.snapshot();

        assert_eq!(first.phase, Phase::PollutedCity);
        assert!(!first.running);
        assert!(controller.analysis().is_none());
        assert_eq!(second.phase, first.phase);
        assert_eq!(second.running, first.running);
    }

    #[test]
    fn reset_supersedes_in_flight_generation() {
        let controller = PhaseController::new();
        let generation = controller.begin_run().unwrap();
        controller.reset();

        assert!(matches!(
            controller.advance(generation, Phase::AiScan),
            Err(EngineError::Superseded { .. })
        ));
        assert!(!controller.store_analysis(generation, RawAnalysis::default().normalize()));
        assert!(controller.analysis().is_none());
    }

    #[test]
    fn finish_run_with_stale_generation_is_noop() {
        let controller = PhaseController::new();
        let stale = controller.begin_run().unwrap();
        controller.reset();
        let fresh = controller.begin_run().unwrap();

        controller.finish_run(stale);
        assert!(controller.is_running());

        controller.finish_run(fresh);
        assert!(!controller.is_running());
    }

    proptest::proptest! {
        /// For any sequence of direct selections while idle, the resulting
        /// phase equals the last value set and is always in range.
        #[test]
        fn set_phase_last_value_wins(indices in proptest::collection::vec(-10i64..15, 1..32)) {
            let controller = PhaseController::new();
            let mut expected = controller.phase();
            for i in indices {
                let target = Phase::from_index(i);
                proptest::prop_assert!(controller.set_phase(target));
                expected = target;
            }
            proptest::prop_assert_eq!(controller.phase(), expected);
            proptest::prop_assert!(controller.phase().index() <= 4);
        }
    }

    #[test]
    fn subscribers_observe_mutations() {
        let controller = PhaseController::new();
        let rx = controller.subscribe();

        controller.set_phase(Phase::Build);
        assert_eq!(rx.borrow().phase, Phase::Build);

        controller.reset();
        assert_eq!(rx.borrow().phase, Phase::PollutedCity);
    }
}
