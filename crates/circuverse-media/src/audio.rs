//! Audio cues
//!
//! The original effects were ad hoc oscillators created per component; here
//! they are a process-wide [`AudioService`] with an explicit `init`/`dispose`
//! lifecycle, injected into whoever needs to trigger a cue. Tones are
//! synthesized descriptions handed to a pluggable [`AudioBackend`]; no real
//! audio device is part of this crate.

use circuverse_model::Phase;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
}

/// One synthesized tone
#[derive(Debug, Clone, PartialEq)]
pub struct ToneCue {
    /// Cue name for logging and tests
    pub name: &'static str,
    pub waveform: Waveform,
    /// Start frequency in Hz
    pub start_hz: f64,
    /// End frequency in Hz (equal to `start_hz` for steady tones)
    pub end_hz: f64,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// Peak gain, 0..=1
    pub peak_gain: f64,
    /// Start offset in milliseconds (for staggered chords)
    pub offset_ms: u64,
}

/// Cue vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
    /// Rising sweep played on phase transitions
    Transition,
    /// C-major chord played at the sustainable finale
    Success,
    /// Short blip for direct interactions
    Click,
    /// Low background drone
    Ambient,
}

impl CueKind {
    /// Tones making up this cue
    #[must_use]
    pub fn tones(self) -> Vec<ToneCue> {
        match self {
            CueKind::Transition => vec![ToneCue {
                name: "transition",
                waveform: Waveform::Sine,
                start_hz: 400.0,
                end_hz: 800.0,
                duration_ms: 300,
                peak_gain: 0.1,
                offset_ms: 0,
            }],
            CueKind::Success => [523.25, 659.25, 783.99]
                .iter()
                .enumerate()
                .map(|(i, hz)| ToneCue {
                    name: "success",
                    waveform: Waveform::Sine,
                    start_hz: *hz,
                    end_hz: *hz,
                    duration_ms: 500,
                    peak_gain: 0.08,
                    offset_ms: i as u64 * 100,
                })
                .collect(),
            CueKind::Click => vec![ToneCue {
                name: "click",
                waveform: Waveform::Square,
                start_hz: 1000.0,
                end_hz: 1000.0,
                duration_ms: 50,
                peak_gain: 0.05,
                offset_ms: 0,
            }],
            CueKind::Ambient => vec![ToneCue {
                name: "ambient",
                waveform: Waveform::Sine,
                start_hz: 80.0,
                end_hz: 80.0,
                duration_ms: 0, // sustained until disposed
                peak_gain: 0.03,
                offset_ms: 0,
            }],
        }
    }

    /// Cue fired when the narrative enters `phase`
    #[must_use]
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::PollutedCity => CueKind::Click,
            Phase::AiScan | Phase::Transform | Phase::Build => CueKind::Transition,
            Phase::Sustainable => CueKind::Success,
        }
    }
}

/// Sink for synthesized tones
pub trait AudioBackend: Send + Sync {
    /// Emit one tone
    fn play(&self, tone: &ToneCue);
}

/// Backend that discards every tone
#[derive(Debug, Default)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn play(&self, _tone: &ToneCue) {}
}

/// Process-wide audio service
///
/// Cues are dropped unless the service is both initialized and enabled, so a
/// disposed service can stay injected without side effects.
pub struct AudioService {
    backend: Arc<dyn AudioBackend>,
    enabled: AtomicBool,
    initialized: AtomicBool,
}

impl AudioService {
    /// Service over a backend, enabled but not yet initialized
    #[must_use]
    pub fn new(backend: Arc<dyn AudioBackend>) -> Self {
        Self {
            backend,
            enabled: AtomicBool::new(true),
            initialized: AtomicBool::new(false),
        }
    }

    /// Service that never emits anything
    #[must_use]
    pub fn disabled() -> Self {
        let service = Self::new(Arc::new(NullBackend));
        service.set_enabled(false);
        service
    }

    /// Acquire the audio context (application mount)
    pub fn init(&self) {
        self.initialized.store(true, Ordering::SeqCst);
        tracing::debug!("audio service initialized");
    }

    /// Release the audio context (application unmount)
    pub fn dispose(&self) {
        self.initialized.store(false, Ordering::SeqCst);
        tracing::debug!("audio service disposed");
    }

    /// Toggle sound output
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Whether cues are currently emitted
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst) && self.initialized.load(Ordering::SeqCst)
    }

    /// Trigger a cue
    pub fn trigger(&self, kind: CueKind) {
        if !self.is_enabled() {
            return;
        }
        for tone in kind.tones() {
            self.backend.play(&tone);
        }
    }
}

impl std::fmt::Debug for AudioService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioService")
            .field("enabled", &self.enabled)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::RecordingBackend;
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn transition_cue_matches_original_sweep() {
        let tones = CueKind::Transition.tones();
        assert_eq!(tones.len(), 1);
        assert_eq!(tones[0].start_hz, 400.0);
        assert_eq!(tones[0].end_hz, 800.0);
        assert_eq!(tones[0].duration_ms, 300);
    }

    #[test]
    fn success_cue_is_a_staggered_chord() {
        let tones = CueKind::Success.tones();
        assert_eq!(tones.len(), 3);
        assert_eq!(tones[0].offset_ms, 0);
        assert_eq!(tones[2].offset_ms, 200);
        assert_eq!(tones[1].start_hz, 659.25);
    }

    #[test]
    fn phase_cue_mapping() {
        assert_eq!(CueKind::for_phase(Phase::PollutedCity), CueKind::Click);
        assert_eq!(CueKind::for_phase(Phase::Transform), CueKind::Transition);
        assert_eq!(CueKind::for_phase(Phase::Sustainable), CueKind::Success);
    }

    #[test]
    fn service_drops_cues_until_initialized() {
        let backend = Arc::new(RecordingBackend::default());
        let service = AudioService::new(backend.clone());

        service.trigger(CueKind::Click);
        assert_eq!(backend.len(), 0);

        service.init();
        service.trigger(CueKind::Click);
        assert_eq!(backend.names(), vec!["click"]);

        service.dispose();
        service.trigger(CueKind::Click);
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn service_respects_enabled_flag() {
        let backend = Arc::new(RecordingBackend::default());
        let service = AudioService::new(backend.clone());
        service.init();
        service.set_enabled(false);

        service.trigger(CueKind::Success);
        assert_eq!(backend.len(), 0);

        service.set_enabled(true);
        service.trigger(CueKind::Success);
        assert_eq!(backend.len(), 3);
    }
}
