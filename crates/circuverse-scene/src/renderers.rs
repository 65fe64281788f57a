//! Concrete scene renderers
//!
//! Thresholds follow the original narrative staging: the city turns clean at
//! phase 3, the transform animation only mounts at phase 2 and settles at 4,
//! the particle field shifts already at 2, and the waste scenario scene keys
//! its content on the classified category.

use crate::contract::{RendererSpec, SceneRenderer, SceneStage, VisualState};
use circuverse_model::{AnalysisResult, Phase, WasteCategory};

/// Historical city scene implementations, collapsed behind one renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CityVariant {
    /// Original low-poly city
    #[default]
    Classic,
    /// Denser props and lighting
    Enhanced,
    /// Orbital galaxy treatment
    Galaxy,
}

impl CityVariant {
    /// Parse a variant name, falling back to [`CityVariant::Classic`]
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "enhanced" => CityVariant::Enhanced,
            "galaxy" => CityVariant::Galaxy,
            _ => CityVariant::Classic,
        }
    }
}

/// Main city scene: visible from phase 0, clean from phase 3
#[derive(Debug)]
pub struct CityRenderer {
    spec: RendererSpec,
    variant: CityVariant,
}

impl CityRenderer {
    /// City scene in the given variant
    #[must_use]
    pub fn new(variant: CityVariant) -> Self {
        Self {
            spec: RendererSpec::new("city", Phase::PollutedCity, Phase::Build),
            variant,
        }
    }

    /// Selected variant
    #[inline]
    #[must_use]
    pub fn variant(&self) -> CityVariant {
        self.variant
    }
}

impl Default for CityRenderer {
    fn default() -> Self {
        Self::new(CityVariant::Classic)
    }
}

impl SceneRenderer for CityRenderer {
    fn spec(&self) -> &RendererSpec {
        &self.spec
    }

    fn render(&self, phase: Phase, analysis: Option<&AnalysisResult>) -> VisualState {
        let stage = self.spec.stage(phase);
        // Lighting ramps from the dim polluted haze to full daylight.
        let base = if self.spec.is_clean(phase) { 1.0 } else { 0.25 };
        let boost = match self.variant {
            CityVariant::Classic => 0.0,
            CityVariant::Enhanced => 0.1,
            CityVariant::Galaxy => 0.05,
        };

        let mut state = VisualState::visible(stage, base + boost);
        if matches!(phase, Phase::AiScan | Phase::Transform) {
            state = state.with_overlay("scan-grid");
        }
        if phase >= Phase::Build {
            state = state.with_overlay("green-towers");
        }
        if phase == Phase::Sustainable {
            state = state.with_overlay("traffic");
        }
        if self.spec.is_clean(phase) {
            if let Some(analysis) = analysis {
                state = state.with_detail(analysis.smart_city_applications.clone());
            }
        }
        state
    }
}

/// Waste-to-material morph: mounts at phase 2, settles at phase 4
#[derive(Debug)]
pub struct TransformRenderer {
    spec: RendererSpec,
}

impl TransformRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            spec: RendererSpec::new("transform", Phase::Transform, Phase::Sustainable),
        }
    }
}

impl Default for TransformRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRenderer for TransformRenderer {
    fn spec(&self) -> &RendererSpec {
        &self.spec
    }

    fn render(&self, phase: Phase, analysis: Option<&AnalysisResult>) -> VisualState {
        if !self.spec.active(phase) {
            return VisualState::hidden();
        }
        let stage = self.spec.stage(phase);
        let intensity = if self.spec.is_clean(phase) { 0.6 } else { 1.0 };

        let mut state = VisualState::visible(stage, intensity).with_overlay("morph");
        if let Some(analysis) = analysis {
            state = state.with_detail(analysis.products.clone());
        }
        state
    }
}

/// Ambient particle field: always visible, shifts character at phase 2
#[derive(Debug)]
pub struct ParticleFieldRenderer {
    spec: RendererSpec,
}

impl ParticleFieldRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            spec: RendererSpec::new("particles", Phase::PollutedCity, Phase::Transform),
        }
    }
}

impl Default for ParticleFieldRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRenderer for ParticleFieldRenderer {
    fn spec(&self) -> &RendererSpec {
        &self.spec
    }

    fn render(&self, phase: Phase, _analysis: Option<&AnalysisResult>) -> VisualState {
        // Smoke thins out once the transformation starts; at the finale the
        // field fades to a light shimmer.
        let intensity = if phase == Phase::Sustainable { 0.4 } else { 0.8 };
        let stage = self.spec.stage(phase);
        let overlay = if self.spec.is_clean(phase) { "sparks" } else { "smog" };
        VisualState::visible(stage, intensity).with_overlay(overlay)
    }
}

/// Category-specific scenario scene: visible from the AI scan onward
#[derive(Debug)]
pub struct WasteScenarioRenderer {
    spec: RendererSpec,
}

impl WasteScenarioRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            spec: RendererSpec::new("scenario", Phase::AiScan, Phase::Build),
        }
    }

    fn scenario_caption(category: WasteCategory) -> &'static str {
        match category {
            WasteCategory::Plastic => "bottle heaps compressed into road aggregate",
            WasteCategory::Electronic => "circuit boards stripped into solar cells",
            WasteCategory::Organic => "food scraps digested into biogas domes",
            WasteCategory::Construction => "rubble crushed into fresh foundations",
            WasteCategory::Textile => "fabric bales rewoven into insulation",
            WasteCategory::Other => "mixed stream sorted for recovery",
        }
    }
}

impl Default for WasteScenarioRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRenderer for WasteScenarioRenderer {
    fn spec(&self) -> &RendererSpec {
        &self.spec
    }

    fn render(&self, phase: Phase, analysis: Option<&AnalysisResult>) -> VisualState {
        if !self.spec.active(phase) {
            return VisualState::hidden();
        }
        let stage = self.spec.stage(phase);
        let state = VisualState::visible(stage, if stage == SceneStage::Clean { 1.0 } else { 0.5 });

        match analysis {
            Some(analysis) => state
                .with_overlay(analysis.category.as_str().to_lowercase())
                .with_detail(vec![
                    Self::scenario_caption(analysis.category).to_string(),
                    format!("{}% recyclable", analysis.recyclability),
                ]),
            // Placeholder until the classification lands.
            None => state.with_detail(vec!["awaiting classification".to_string()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuverse_test_utils::sample_analysis;
    use pretty_assertions::assert_eq;

    fn all_renderers() -> Vec<Box<dyn SceneRenderer>> {
        vec![
            Box::new(CityRenderer::default()),
            Box::new(CityRenderer::new(CityVariant::Enhanced)),
            Box::new(CityRenderer::new(CityVariant::Galaxy)),
            Box::new(TransformRenderer::new()),
            Box::new(ParticleFieldRenderer::new()),
            Box::new(WasteScenarioRenderer::new()),
        ]
    }

    #[test]
    fn every_renderer_is_total_over_all_phases() {
        let analysis = sample_analysis();
        for renderer in all_renderers() {
            for phase in Phase::ALL {
                for analysis in [None, Some(&analysis)] {
                    let state = renderer.render(phase, analysis);
                    assert!((0.0..=1.0).contains(&state.intensity));
                }
            }
        }
    }

    #[test]
    fn boundary_phases_zero_and_four() {
        let analysis = sample_analysis();
        for renderer in all_renderers() {
            let start = renderer.render(Phase::PollutedCity, None);
            let end = renderer.render(Phase::Sustainable, Some(&analysis));
            assert_eq!(start.visible, renderer.spec().active(Phase::PollutedCity));
            assert!(end.visible, "{} must be visible at phase 4", renderer.spec().name);
            assert_eq!(end.stage, SceneStage::Clean);
        }
    }

    #[test]
    fn city_scan_grid_only_during_scan_and_transform() {
        let city = CityRenderer::default();
        let has_grid =
            |phase| city.render(phase, None).overlays.iter().any(|o| o == "scan-grid");

        assert!(!has_grid(Phase::PollutedCity));
        assert!(has_grid(Phase::AiScan));
        assert!(has_grid(Phase::Transform));
        assert!(!has_grid(Phase::Build));
        assert!(!has_grid(Phase::Sustainable));
    }

    #[test]
    fn city_traffic_only_at_finale() {
        let city = CityRenderer::default();
        let state = city.render(Phase::Sustainable, None);
        assert!(state.overlays.iter().any(|o| o == "traffic"));
        assert!(!city.render(Phase::Build, None).overlays.iter().any(|o| o == "traffic"));
    }

    #[test]
    fn transform_hidden_before_phase_two() {
        let transform = TransformRenderer::new();
        assert!(!transform.render(Phase::AiScan, None).visible);
        assert!(transform.render(Phase::Transform, None).visible);
        assert_eq!(
            transform.render(Phase::Transform, None).stage,
            SceneStage::Transforming
        );
        assert_eq!(
            transform.render(Phase::Sustainable, None).stage,
            SceneStage::Clean
        );
    }

    #[test]
    fn scenario_switches_on_category_not_text() {
        let scenario = WasteScenarioRenderer::new();
        let analysis = sample_analysis();
        let state = scenario.render(Phase::Build, Some(&analysis));

        assert!(state.overlays.iter().any(|o| o == "plastic"));
        assert!(state.detail[0].contains("road aggregate"));
    }

    #[test]
    fn scenario_placeholder_without_analysis() {
        let scenario = WasteScenarioRenderer::new();
        let state = scenario.render(Phase::AiScan, None);
        assert_eq!(state.detail, vec!["awaiting classification".to_string()]);
    }

    #[test]
    fn particles_fade_at_finale() {
        let particles = ParticleFieldRenderer::new();
        assert_eq!(particles.render(Phase::Build, None).intensity, 0.8);
        assert_eq!(particles.render(Phase::Sustainable, None).intensity, 0.4);
    }

    #[test]
    fn city_variant_parse() {
        assert_eq!(CityVariant::parse("enhanced"), CityVariant::Enhanced);
        assert_eq!(CityVariant::parse("GALAXY"), CityVariant::Galaxy);
        assert_eq!(CityVariant::parse("anything"), CityVariant::Classic);
    }
}
