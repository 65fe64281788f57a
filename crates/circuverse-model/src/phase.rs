//! Narrative phase of a waste transformation run
//!
//! A [`Phase`] is the small integer (0..=4) that every scene renderer and
//! ancillary observer keys its behavior on. Phases are totally ordered and
//! monotonically non-decreasing during an automated run; direct selection
//! is allowed only while no run is in progress.

use serde::{Deserialize, Serialize};

/// Narrative step of the transformation, ordered 0 through 4
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Initial waste scenario
    #[default]
    PollutedCity = 0,
    /// Neural network analysis
    AiScan = 1,
    /// Waste to material
    Transform = 2,
    /// Smart city creation
    Build = 3,
    /// Circular ecosystem
    Sustainable = 4,
}

impl Phase {
    /// All phases in narrative order
    pub const ALL: [Phase; 5] = [
        Phase::PollutedCity,
        Phase::AiScan,
        Phase::Transform,
        Phase::Build,
        Phase::Sustainable,
    ];

    /// Integer index of this phase (0..=4)
    #[inline]
    #[must_use]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Phase for an arbitrary integer index, clamped into range
    ///
    /// Out-of-range indices are defensive defaults, never errors:
    /// negative values map to [`Phase::PollutedCity`], values above 4 to
    /// [`Phase::Sustainable`].
    #[must_use]
    pub fn from_index(index: i64) -> Self {
        match index {
            i64::MIN..=0 => Phase::PollutedCity,
            1 => Phase::AiScan,
            2 => Phase::Transform,
            3 => Phase::Build,
            _ => Phase::Sustainable,
        }
    }

    /// Next phase in the sequence, `None` after [`Phase::Sustainable`]
    #[inline]
    #[must_use]
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::PollutedCity => Some(Phase::AiScan),
            Phase::AiScan => Some(Phase::Transform),
            Phase::Transform => Some(Phase::Build),
            Phase::Build => Some(Phase::Sustainable),
            Phase::Sustainable => None,
        }
    }

    /// Whether this is the terminal phase of a run
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Sustainable)
    }

    /// Short indicator label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Phase::PollutedCity => "Polluted City",
            Phase::AiScan => "AI Scan",
            Phase::Transform => "Transform",
            Phase::Build => "Build",
            Phase::Sustainable => "Sustainable",
        }
    }

    /// One-line indicator description
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Phase::PollutedCity => "Initial waste scenario",
            Phase::AiScan => "Neural network analysis",
            Phase::Transform => "Waste to material",
            Phase::Build => "Smart city creation",
            Phase::Sustainable => "Circular ecosystem",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.index())
    }
}
