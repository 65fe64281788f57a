//! Run sequencing
//!
//! [`SequenceEngine`] drives one complete traversal of phases 0 through 4
//! with fixed delays between transitions, invoking the analyzer once during
//! the scan phase. The analyzer call is the single network suspension point;
//! its failure is recorded but never halts the visual narrative.

use crate::analyzer::WasteAnalyzer;
use crate::controller::PhaseController;
use crate::error::EngineError;
use circuverse_model::{AnalysisResult, Phase};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Fixed delays between phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceTiming {
    /// Dwell on the polluted city before the AI scan starts
    pub scan_delay: Duration,
    /// Dwell on the transform phase before building starts
    pub transform_delay: Duration,
    /// Dwell on the build phase before the sustainable finale
    pub build_delay: Duration,
}

impl SequenceTiming {
    /// Construct from millisecond values
    #[inline]
    #[must_use]
    pub fn from_millis(scan: u64, transform: u64, build: u64) -> Self {
        Self {
            scan_delay: Duration::from_millis(scan),
            transform_delay: Duration::from_millis(transform),
            build_delay: Duration::from_millis(build),
        }
    }

    /// With scan delay
    #[inline]
    #[must_use]
    pub fn with_scan_delay(mut self, delay: Duration) -> Self {
        self.scan_delay = delay;
        self
    }

    /// With transform delay
    #[inline]
    #[must_use]
    pub fn with_transform_delay(mut self, delay: Duration) -> Self {
        self.transform_delay = delay;
        self
    }

    /// With build delay
    #[inline]
    #[must_use]
    pub fn with_build_delay(mut self, delay: Duration) -> Self {
        self.build_delay = delay;
        self
    }
}

impl Default for SequenceTiming {
    fn default() -> Self {
        Self::from_millis(1500, 2000, 2000)
    }
}

/// Outcome of one completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Phases visited, in order (always `[0,1,2,3,4]` for an unsuperseded run)
    pub phases: Vec<Phase>,
    /// Analysis result, `None` when the analyzer failed
    pub analysis: Option<AnalysisResult>,
    /// Analyzer failure surfaced to the user, if any
    pub analysis_error: Option<String>,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunReport {
    /// Whether the analyzer produced a result
    #[inline]
    #[must_use]
    pub fn analysis_succeeded(&self) -> bool {
        self.analysis.is_some()
    }
}

/// Drives automated phase traversals against an analyzer
pub struct SequenceEngine {
    controller: Arc<PhaseController>,
    analyzer: Arc<dyn WasteAnalyzer>,
    timing: SequenceTiming,
}

impl SequenceEngine {
    /// Create an engine with default timing
    #[must_use]
    pub fn new(analyzer: Arc<dyn WasteAnalyzer>) -> Self {
        Self {
            controller: Arc::new(PhaseController::new()),
            analyzer,
            timing: SequenceTiming::default(),
        }
    }

    /// With custom timing
    #[inline]
    #[must_use]
    pub fn with_timing(mut self, timing: SequenceTiming) -> Self {
        self.timing = timing;
        self
    }

    /// The controller this engine drives
    #[inline]
    #[must_use]
    pub fn controller(&self) -> &Arc<PhaseController> {
        &self.controller
    }

    /// Configured timing
    #[inline]
    #[must_use]
    pub fn timing(&self) -> SequenceTiming {
        self.timing
    }

    /// Run one complete transformation sequence
    ///
    /// # Workflow
    /// 1. Enter `Running` at phase 0 and capture the run generation
    /// 2. Wait, then advance to the AI scan phase
    /// 3. Await the analyzer; store the result, or record the failure and
    ///    continue
    /// 4. Advance through transform and build with fixed dwells
    /// 5. Finish at the sustainable phase and return to idle
    ///
    /// # Errors
    /// - [`EngineError::RunInProgress`] when a run is already active
    /// - [`EngineError::EmptyInput`] when the input trims to nothing
    /// - [`EngineError::Superseded`] when a reset or newer run overtook this
    ///   one; the controller state is whatever the superseding action set
    pub async fn run(&self, input: &str) -> Result<RunReport, EngineError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(EngineError::EmptyInput);
        }

        let started = Instant::now();
        let generation = self.controller.begin_run()?;
        tracing::info!(generation, input, "transformation run started");

        let mut phases = vec![Phase::PollutedCity];

        self.step(generation, Phase::AiScan, self.timing.scan_delay).await?;
        phases.push(Phase::AiScan);

        // Single suspension point tied to network I/O. Failure is surfaced
        // in the report while the sequence keeps going.
        let (analysis, analysis_error) = match self.analyzer.analyze(input).await {
            Ok(result) => {
                if !self.controller.store_analysis(generation, result.clone()) {
                    let current = self.controller.generation();
                    return Err(EngineError::Superseded {
                        stale: generation,
                        current,
                    });
                }
                (Some(result), None)
            }
            Err(err) => {
                tracing::warn!(generation, error = %err, "analysis failed, continuing sequence");
                (None, Some(err.to_string()))
            }
        };

        self.step(generation, Phase::Transform, Duration::ZERO).await?;
        phases.push(Phase::Transform);

        self.step(generation, Phase::Build, self.timing.transform_delay).await?;
        phases.push(Phase::Build);

        self.step(generation, Phase::Sustainable, self.timing.build_delay).await?;
        phases.push(Phase::Sustainable);

        self.controller.finish_run(generation);
        let elapsed = started.elapsed();
        tracing::info!(generation, ?elapsed, "transformation run finished");

        Ok(RunReport {
            phases,
            analysis,
            analysis_error,
            elapsed,
        })
    }

    /// Dwell, then advance to `phase` under the captured generation
    async fn step(
        &self,
        generation: u64,
        phase: Phase,
        dwell: Duration,
    ) -> Result<(), EngineError> {
        tokio::time::sleep(dwell).await;
        self.controller.advance(generation, phase)?;
        tracing::debug!(generation, %phase, "phase transition");
        Ok(())
    }
}

impl std::fmt::Debug for SequenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceEngine")
            .field("controller", &self.controller)
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}
