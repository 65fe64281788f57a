//! Renderer registry
//!
//! Single fan-out dispatch point: renderers register under a name and are
//! driven together from the current phase. The raw-index entry point clamps
//! out-of-range phases instead of failing, so a misbehaving caller degrades
//! to the nearest valid visual instead of a panic.

use crate::contract::{SceneRenderer, VisualState};
use crate::renderers::{
    CityRenderer, CityVariant, ParticleFieldRenderer, TransformRenderer, WasteScenarioRenderer,
};
use circuverse_model::{AnalysisResult, Phase};
use std::sync::Arc;

/// Ordered name -> renderer registry
#[derive(Default, Clone)]
pub struct SceneRegistry {
    renderers: Vec<(String, Arc<dyn SceneRenderer>)>,
}

impl SceneRegistry {
    /// Create an empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in renderers, city scene in `variant`
    #[must_use]
    pub fn with_defaults(variant: CityVariant) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CityRenderer::new(variant)));
        registry.register(Arc::new(TransformRenderer::new()));
        registry.register(Arc::new(ParticleFieldRenderer::new()));
        registry.register(Arc::new(WasteScenarioRenderer::new()));
        registry
    }

    /// Register a renderer under its spec name; replaces any existing entry
    pub fn register(&mut self, renderer: Arc<dyn SceneRenderer>) {
        let name = renderer.spec().name.to_string();
        if let Some(slot) = self.renderers.iter_mut().find(|(n, _)| *n == name) {
            tracing::debug!(%name, "replacing registered renderer");
            slot.1 = renderer;
        } else {
            self.renderers.push((name, renderer));
        }
    }

    /// Look up a renderer by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn SceneRenderer>> {
        self.renderers.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    /// Registered names in registration order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.renderers.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Number of registered renderers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    /// Whether the registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Render every registered renderer for a phase
    #[must_use]
    pub fn render_all(
        &self,
        phase: Phase,
        analysis: Option<&AnalysisResult>,
    ) -> Vec<(String, VisualState)> {
        self.renderers
            .iter()
            .map(|(name, renderer)| (name.clone(), renderer.render(phase, analysis)))
            .collect()
    }

    /// Render for a raw integer phase index, clamped into range
    #[must_use]
    pub fn render_all_raw(
        &self,
        index: i64,
        analysis: Option<&AnalysisResult>,
    ) -> Vec<(String, VisualState)> {
        self.render_all(Phase::from_index(index), analysis)
    }
}

impl std::fmt::Debug for SceneRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneRegistry")
            .field("renderers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuverse_test_utils::sample_analysis;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_register_the_four_scenes() {
        let registry = SceneRegistry::with_defaults(CityVariant::Classic);
        assert_eq!(registry.names(), vec!["city", "transform", "particles", "scenario"]);
        assert!(!registry.is_empty());
    }

    #[test]
    fn register_replaces_by_name() {
        let mut registry = SceneRegistry::with_defaults(CityVariant::Classic);
        let before = registry.len();
        registry.register(Arc::new(CityRenderer::new(CityVariant::Galaxy)));

        assert_eq!(registry.len(), before);
        assert!(registry.get("city").is_some());
    }

    #[test]
    fn render_all_covers_every_phase_without_panicking() {
        let registry = SceneRegistry::with_defaults(CityVariant::Enhanced);
        let analysis = sample_analysis();

        for phase in Phase::ALL {
            let states = registry.render_all(phase, Some(&analysis));
            assert_eq!(states.len(), registry.len());
        }
    }

    #[test]
    fn raw_dispatch_clamps_out_of_range_indices() {
        let registry = SceneRegistry::with_defaults(CityVariant::Classic);

        let low = registry.render_all_raw(-7, None);
        let zero = registry.render_all(Phase::PollutedCity, None);
        assert_eq!(low, zero);

        let high = registry.render_all_raw(99, None);
        let four = registry.render_all(Phase::Sustainable, None);
        assert_eq!(high, four);
    }

    #[test]
    fn unknown_name_lookup_is_none() {
        let registry = SceneRegistry::with_defaults(CityVariant::Classic);
        assert!(registry.get("hologram").is_none());
    }
}
