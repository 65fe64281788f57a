//! Analysis results
//!
//! [`AnalysisResult`] is the structured classification of a waste scenario
//! produced by the external AI collaborator. The wire shape is
//! [`RawAnalysis`], in which every field is optional; [`RawAnalysis::normalize`]
//! applies the documented defaults so the object handed to renderers is never
//! partially null. Results are replaced whole, never patched field by field.

use crate::category::WasteCategory;
use serde::{Deserialize, Serialize};

/// Default recyclability percentage when the endpoint omits it
pub const DEFAULT_RECYCLABILITY: u8 = 75;
/// Default circular economy score when the endpoint omits it
pub const DEFAULT_CIRCULAR_SCORE: u8 = 50;

/// Fully populated waste analysis, safe for read-only fan-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Identified type of waste, e.g. "Plastic Polymer Waste"
    pub waste_type: String,
    /// Category derived once from `waste_type`
    pub category: WasteCategory,
    /// Recyclability percentage, 0..=100
    pub recyclability: u8,
    /// Products the waste can be transformed into (never empty)
    pub products: Vec<String>,
    /// Estimated kg of CO2 saved per ton recycled
    pub co2_saved: f64,
    /// Estimated kWh of energy saved per ton recycled
    pub energy_saved: f64,
    /// Circular economy potential, 0..=100
    pub circular_score: u8,
    /// Smart city applications for the recycled products
    pub smart_city_applications: Vec<String>,
    /// Narrative description of the transformation potential
    pub description: String,
    /// Processing steps, possibly empty when the model omits them
    #[serde(default)]
    pub processing_steps: Vec<String>,
    /// Environmental benefit summary
    #[serde(default)]
    pub environmental_impact: Option<String>,
}

impl AnalysisResult {
    /// Headline metric lines for dashboards and scene captions
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("{} ({}% recyclable)", self.waste_type, self.recyclability),
            format!("{:.0} kg CO2 / {:.0} kWh saved per ton", self.co2_saved, self.energy_saved),
            format!("circular score {}", self.circular_score),
        ]
    }
}

/// Analysis payload as returned by the endpoint, every field optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalysis {
    pub waste_type: Option<String>,
    pub recyclability: Option<f64>,
    pub products: Option<Vec<String>>,
    pub co2_saved: Option<f64>,
    pub energy_saved: Option<f64>,
    pub circular_score: Option<f64>,
    pub smart_city_applications: Option<Vec<String>>,
    pub description: Option<String>,
    pub processing_steps: Option<Vec<String>>,
    pub environmental_impact: Option<String>,
}

impl RawAnalysis {
    /// Apply endpoint defaults and clamp every metric into its valid range
    #[must_use]
    pub fn normalize(self) -> AnalysisResult {
        let waste_type = self
            .waste_type
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "Unknown Waste".to_string());
        let category = WasteCategory::classify(&waste_type);

        let products = match self.products {
            Some(p) if !p.is_empty() => p,
            _ => vec!["Recycled Materials".to_string()],
        };
        let smart_city_applications = match self.smart_city_applications {
            Some(a) if !a.is_empty() => a,
            _ => vec!["Sustainable Infrastructure".to_string()],
        };

        AnalysisResult {
            waste_type,
            category,
            recyclability: clamp_percent(self.recyclability, DEFAULT_RECYCLABILITY),
            products,
            co2_saved: self.co2_saved.unwrap_or(0.0).max(0.0),
            energy_saved: self.energy_saved.unwrap_or(0.0).max(0.0),
            circular_score: clamp_percent(self.circular_score, DEFAULT_CIRCULAR_SCORE),
            smart_city_applications,
            description: self
                .description
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Analysis complete.".to_string()),
            processing_steps: self.processing_steps.unwrap_or_default(),
            environmental_impact: self.environmental_impact,
        }
    }
}

fn clamp_percent(value: Option<f64>, default: u8) -> u8 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 100.0).round() as u8,
        _ => default,
    }
}
