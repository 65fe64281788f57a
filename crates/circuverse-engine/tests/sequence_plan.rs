//! End-to-end run sequencing scenarios
//!
//! Exercises the full traversal against stub analyzers: ordering, terminal
//! state, the running guard, reset semantics and the stale-response race.

use circuverse_engine::{EngineError, PhaseController, SequenceEngine, SequenceTiming};
use circuverse_model::Phase;
use circuverse_test_utils::{FailingAnalyzer, StubAnalyzer};
use std::sync::Arc;
use std::time::Duration;

fn fast_timing() -> SequenceTiming {
    SequenceTiming::from_millis(5, 5, 5)
}

#[tokio::test]
async fn run_visits_every_phase_in_order() {
    let engine =
        SequenceEngine::new(Arc::new(StubAnalyzer::new())).with_timing(fast_timing());

    let report = engine.run("test organic waste").await.unwrap();

    assert_eq!(report.phases, Phase::ALL.to_vec());
    assert!(report.analysis_succeeded());
    assert!(report.analysis_error.is_none());
    assert!(!engine.controller().is_running());
    assert_eq!(engine.controller().phase(), Phase::Sustainable);
}

#[tokio::test]
async fn run_reaches_terminal_phase_when_analysis_fails() {
    let engine =
        SequenceEngine::new(Arc::new(FailingAnalyzer::default())).with_timing(fast_timing());

    let report = engine.run("unclassifiable sludge").await.unwrap();

    assert_eq!(report.phases, Phase::ALL.to_vec());
    assert!(report.analysis.is_none());
    assert!(report.analysis_error.unwrap().contains("AI analysis failed"));
    assert_eq!(engine.controller().phase(), Phase::Sustainable);
    assert!(!engine.controller().is_running());
    // Degraded but functional: renderers fall back to placeholder metrics
    assert!(engine.controller().analysis().is_none());
}

#[tokio::test]
async fn run_with_delayed_analyzer_still_completes() {
    let analyzer = Arc::new(StubAnalyzer::with_delay(Duration::from_millis(20)));
    let engine = SequenceEngine::new(analyzer.clone()).with_timing(fast_timing());

    let report = engine.run("city plastic waste problem").await.unwrap();

    assert_eq!(report.phases.last(), Some(&Phase::Sustainable));
    assert_eq!(analyzer.call_count(), 1);
    assert!(engine.controller().analysis().is_some());
}

#[tokio::test]
async fn concurrent_run_is_rejected() {
    let analyzer = Arc::new(StubAnalyzer::with_delay(Duration::from_millis(50)));
    let engine = Arc::new(SequenceEngine::new(analyzer).with_timing(fast_timing()));

    let background = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.run("plastic packaging").await })
    };

    // Give the first run time to enter the running state.
    tokio::time::sleep(Duration::from_millis(10)).await;
    let second = engine.run("competing input").await;
    assert!(matches!(second, Err(EngineError::RunInProgress)));

    let first = background.await.unwrap().unwrap();
    assert_eq!(first.phases, Phase::ALL.to_vec());
}

#[tokio::test]
async fn set_phase_is_noop_while_running() {
    let analyzer = Arc::new(StubAnalyzer::with_delay(Duration::from_millis(50)));
    let engine = Arc::new(SequenceEngine::new(analyzer).with_timing(fast_timing()));
    let controller = Arc::clone(engine.controller());

    let background = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.run("e-waste pile").await })
    };

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(controller.is_running());
    let phase_before = controller.phase();
    assert!(!controller.set_phase(Phase::Sustainable));
    assert_eq!(controller.phase(), phase_before);

    background.await.unwrap().unwrap();
    assert!(controller.set_phase(Phase::Build));
}

#[tokio::test]
async fn reset_mid_run_supersedes_and_discards_analysis() {
    let analyzer = Arc::new(StubAnalyzer::with_delay(Duration::from_millis(60)));
    let engine = Arc::new(
        SequenceEngine::new(analyzer).with_timing(SequenceTiming::from_millis(5, 5, 5)),
    );
    let controller = Arc::clone(engine.controller());

    let background = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.run("plastic bags everywhere").await })
    };

    // Reset while the analyzer is still in flight.
    tokio::time::sleep(Duration::from_millis(20)).await;
    controller.reset();

    let outcome = background.await.unwrap();
    assert!(matches!(outcome, Err(EngineError::Superseded { .. })));

    // The stale response must not overwrite the reset state.
    assert!(controller.analysis().is_none());
    assert_eq!(controller.phase(), Phase::PollutedCity);
    assert!(!controller.is_running());
}

#[tokio::test]
async fn empty_input_is_rejected_before_any_transition() {
    let engine = SequenceEngine::new(Arc::new(StubAnalyzer::new())).with_timing(fast_timing());

    assert!(matches!(engine.run("   ").await, Err(EngineError::EmptyInput)));
    assert_eq!(engine.controller().phase(), Phase::PollutedCity);
    assert!(!engine.controller().is_running());
}

#[tokio::test]
async fn subscribers_observe_monotonic_phases_during_a_run() {
    let engine = Arc::new(
        SequenceEngine::new(Arc::new(StubAnalyzer::new()))
            .with_timing(SequenceTiming::from_millis(10, 10, 10)),
    );
    let mut rx = engine.controller().subscribe();

    let observer = tokio::spawn(async move {
        let mut seen = vec![rx.borrow_and_update().phase];
        while rx.changed().await.is_ok() {
            let snap = *rx.borrow_and_update();
            seen.push(snap.phase);
            if snap.phase.is_terminal() && !snap.running {
                break;
            }
        }
        seen
    });

    engine.run("construction debris").await.unwrap();
    drop(engine);

    let seen = observer.await.unwrap();
    // Watch semantics may coalesce, but never reorder.
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(seen.last(), Some(&Phase::Sustainable));
}

#[tokio::test]
async fn rerun_after_completion_replaces_analysis_whole() {
    let engine =
        SequenceEngine::new(Arc::new(StubAnalyzer::new())).with_timing(fast_timing());

    engine.run("textile waste from fashion").await.unwrap();
    let first = engine.controller().analysis().unwrap();
    assert!(first.waste_type.contains("Textile"));

    engine.run("food scraps from markets").await.unwrap();
    let second = engine.controller().analysis().unwrap();
    assert!(second.waste_type.contains("Organic"));
}

#[test]
fn standalone_controller_reset_is_idempotent() {
    let controller = PhaseController::new();
    controller.set_phase(Phase::Build);

    controller.reset();
    let once = controller.snapshot();
    controller.reset();
    let twice = controller.snapshot();

    assert_eq!(once.phase, twice.phase);
    assert_eq!(once.running, twice.running);
    assert_eq!(once.phase, Phase::PollutedCity);
}
