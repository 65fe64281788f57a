//! Voice narration scripts
//!
//! One script per phase, spoken when the narrative enters that phase.
//! Narration is a trigger-only side effect; it never feeds back into the
//! phase controller.

use circuverse_model::Phase;
use std::sync::atomic::{AtomicBool, Ordering};

/// One narration script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NarrationStep {
    pub phase: Phase,
    pub title: &'static str,
    pub text: &'static str,
}

const SCRIPTS: [NarrationStep; 5] = [
    NarrationStep {
        phase: Phase::PollutedCity,
        title: "Welcome to CIRCUVERSE",
        text: "Welcome to CIRCUVERSE AI, the circular economy visualization \
               platform powered entirely by artificial intelligence. Describe \
               a waste scenario, then start the transformation to watch AI \
               turn waste problems into sustainable solutions.",
    },
    NarrationStep {
        phase: Phase::AiScan,
        title: "AI Analysis Phase",
        text: "Initiating advanced AI analysis. The model is scanning your \
               waste input, identifying material composition, contamination \
               levels and recyclability potential, and evaluating reuse, \
               repair, recycle and redesign pathways.",
    },
    NarrationStep {
        phase: Phase::Transform,
        title: "Material Transformation",
        text: "Transformation sequence activated. Waste particles morph into \
               valuable resources: plastic becomes durable road material, \
               e-waste becomes solar panels, organic matter generates clean \
               biogas energy.",
    },
    NarrationStep {
        phase: Phase::Build,
        title: "Sustainable Products",
        text: "Product generation complete. Recycled materials are visualized \
               as smart city components: plastic roads, eco-brick housing, \
               wind turbines and growing urban forests.",
    },
    NarrationStep {
        phase: Phase::Sustainable,
        title: "Environmental Impact",
        text: "Impact analysis finalized. Carbon dioxide reduced, clean energy \
               recovered and water conserved. The circular economy is now \
               visible, measurable and actionable.",
    },
];

/// Phase-keyed narration trigger
#[derive(Debug)]
pub struct Narrator {
    enabled: AtomicBool,
}

impl Narrator {
    /// Narrator with narration enabled
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
        }
    }

    /// Toggle narration
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Whether narration fires
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Script for a phase (always defined)
    #[must_use]
    pub fn script_for(&self, phase: Phase) -> &'static NarrationStep {
        &SCRIPTS[phase.index() as usize]
    }

    /// Text to speak when entering `phase`, `None` while disabled
    #[must_use]
    pub fn narrate(&self, phase: Phase) -> Option<&'static NarrationStep> {
        if !self.is_enabled() {
            return None;
        }
        let step = self.script_for(phase);
        tracing::info!(phase = %phase, title = step.title, "narration");
        Some(step)
    }
}

impl Default for Narrator {
    fn default() -> Self {
        Self::new()
    }
}
