//! Scene renderer contract
//!
//! Every renderer is a pure function of the current phase and the latest
//! analysis: no renderer-local history, no writes into any other component.
//! Each renderer declares its activation threshold and its own "clean"
//! threshold as static metadata - the thresholds are deliberately NOT unified
//! across renderers; different elements of the narrative transform at
//! different points.

use circuverse_model::{AnalysisResult, Phase};
use serde::{Deserialize, Serialize};

/// Dramatic stage a renderer presents for a given phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneStage {
    /// Pre-run waste scenario
    Polluted,
    /// AI scan in progress
    Scanning,
    /// Material transformation underway
    Transforming,
    /// Past this renderer's clean threshold
    Clean,
}

/// Static renderer metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererSpec {
    /// Registry name
    pub name: &'static str,
    /// Visible when `phase >= activation`
    pub activation: Phase,
    /// Presents as clean when `phase >= clean_threshold`
    pub clean_threshold: Phase,
}

impl RendererSpec {
    /// Create renderer metadata
    #[inline]
    #[must_use]
    pub const fn new(name: &'static str, activation: Phase, clean_threshold: Phase) -> Self {
        Self {
            name,
            activation,
            clean_threshold,
        }
    }

    /// Whether the renderer is visible at `phase`
    #[inline]
    #[must_use]
    pub fn active(&self, phase: Phase) -> bool {
        phase >= self.activation
    }

    /// Whether `phase` has crossed this renderer's clean threshold
    #[inline]
    #[must_use]
    pub fn is_clean(&self, phase: Phase) -> bool {
        phase >= self.clean_threshold
    }

    /// Default stage mapping shared by most renderers
    #[must_use]
    pub fn stage(&self, phase: Phase) -> SceneStage {
        if self.is_clean(phase) {
            SceneStage::Clean
        } else {
            match phase {
                Phase::PollutedCity => SceneStage::Polluted,
                Phase::AiScan => SceneStage::Scanning,
                _ => SceneStage::Transforming,
            }
        }
    }
}

/// Renderable visual state, defined for every phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    /// Whether the renderer contributes anything at this phase
    pub visible: bool,
    /// Dramatic stage
    pub stage: SceneStage,
    /// Overall brightness/energy, clamped into 0..=1
    pub intensity: f32,
    /// Active visual features (scan grid, traffic, growth...)
    pub overlays: Vec<String>,
    /// Caption lines derived from the analysis
    pub detail: Vec<String>,
}

impl VisualState {
    /// Hidden state used below a renderer's activation threshold
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            visible: false,
            stage: SceneStage::Polluted,
            intensity: 0.0,
            overlays: Vec::new(),
            detail: Vec::new(),
        }
    }

    /// Visible state at the given stage and intensity
    #[must_use]
    pub fn visible(stage: SceneStage, intensity: f32) -> Self {
        Self {
            visible: true,
            stage,
            intensity: intensity.clamp(0.0, 1.0),
            overlays: Vec::new(),
            detail: Vec::new(),
        }
    }

    /// Add an overlay feature tag
    #[inline]
    #[must_use]
    pub fn with_overlay(mut self, overlay: impl Into<String>) -> Self {
        self.overlays.push(overlay.into());
        self
    }

    /// Add caption lines
    #[inline]
    #[must_use]
    pub fn with_detail(mut self, detail: Vec<String>) -> Self {
        self.detail = detail;
        self
    }
}

/// A visual component driven purely by `(phase, analysis)`
///
/// # Contract
/// - `render` must be total: a defined, non-panicking output for every phase
/// - output depends only on the arguments, never on internal mutable state
pub trait SceneRenderer: Send + Sync {
    /// Static metadata
    fn spec(&self) -> &RendererSpec;

    /// Compute the visual state for a phase and the latest analysis
    fn render(&self, phase: Phase, analysis: Option<&AnalysisResult>) -> VisualState;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn spec_activation_gate() {
        let spec = RendererSpec::new("x", Phase::Transform, Phase::Sustainable);
        assert!(!spec.active(Phase::AiScan));
        assert!(spec.active(Phase::Transform));
        assert!(spec.active(Phase::Sustainable));
    }

    #[test]
    fn spec_stage_mapping_respects_clean_threshold() {
        let early = RendererSpec::new("early", Phase::PollutedCity, Phase::Transform);
        assert_eq!(early.stage(Phase::Transform), SceneStage::Clean);

        let late = RendererSpec::new("late", Phase::PollutedCity, Phase::Sustainable);
        assert_eq!(late.stage(Phase::Transform), SceneStage::Transforming);
        assert_eq!(late.stage(Phase::AiScan), SceneStage::Scanning);
        assert_eq!(late.stage(Phase::PollutedCity), SceneStage::Polluted);
    }

    #[test]
    fn visual_state_clamps_intensity() {
        assert_eq!(VisualState::visible(SceneStage::Clean, 7.0).intensity, 1.0);
        assert_eq!(VisualState::visible(SceneStage::Clean, -1.0).intensity, 0.0);
    }
}
