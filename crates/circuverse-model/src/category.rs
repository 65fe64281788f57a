//! Waste categories
//!
//! The classification step produces a [`WasteCategory`] exactly once; scene
//! renderers switch on the enum instead of re-parsing free text in multiple
//! places.

use serde::{Deserialize, Serialize};

/// Tagged waste category derived from a free-form scenario description
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WasteCategory {
    Plastic,
    Electronic,
    Organic,
    Construction,
    Textile,
    #[default]
    Other,
}

impl WasteCategory {
    /// All categories, specific ones first
    pub const ALL: [WasteCategory; 6] = [
        WasteCategory::Plastic,
        WasteCategory::Electronic,
        WasteCategory::Organic,
        WasteCategory::Construction,
        WasteCategory::Textile,
        WasteCategory::Other,
    ];

    /// Classify free text into a category by keyword
    ///
    /// Matching is case-insensitive and first-match-wins in the order
    /// plastic, electronic, organic, construction, textile.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("plastic") {
            WasteCategory::Plastic
        } else if lower.contains("electronic") || lower.contains("e-waste") {
            WasteCategory::Electronic
        } else if lower.contains("organic") || lower.contains("food") {
            WasteCategory::Organic
        } else if lower.contains("construction") || lower.contains("building") {
            WasteCategory::Construction
        } else if lower.contains("textile") || lower.contains("cloth") {
            WasteCategory::Textile
        } else {
            WasteCategory::Other
        }
    }

    /// Canonical display name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WasteCategory::Plastic => "Plastic",
            WasteCategory::Electronic => "Electronic",
            WasteCategory::Organic => "Organic",
            WasteCategory::Construction => "Construction",
            WasteCategory::Textile => "Textile",
            WasteCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
