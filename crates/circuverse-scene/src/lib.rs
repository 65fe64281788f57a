//! Circuverse scene layer
//!
//! The renderer fan-out contract: every scene is a pure function
//! `(phase, analysis) -> VisualState` with per-renderer activation and clean
//! thresholds declared as static metadata, dispatched together through a
//! [`SceneRegistry`].

#![warn(unreachable_pub)]

pub mod contract;
pub mod registry;
pub mod renderers;

pub use contract::{RendererSpec, SceneRenderer, SceneStage, VisualState};
pub use registry::SceneRegistry;
pub use renderers::{
    CityRenderer, CityVariant, ParticleFieldRenderer, TransformRenderer, WasteScenarioRenderer,
};
