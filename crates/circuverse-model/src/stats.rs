//! Aggregate statistics
//!
//! Read-only feed computed by the statistics endpoint over historical
//! analysis records. Field names follow the endpoint's camelCase wire format.

use serde::{Deserialize, Serialize};

/// Global aggregate statistics over all submissions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_submissions: u64,
    #[serde(rename = "totalCO2Saved")]
    pub total_co2_saved: f64,
    pub total_energy_saved: f64,
    pub avg_circular_score: f64,
    #[serde(default)]
    pub waste_type_distribution: Vec<WasteTypeShare>,
    #[serde(default)]
    pub daily_activity: Vec<DailyActivity>,
    #[serde(default)]
    pub recent_submissions_count: u64,
    #[serde(default)]
    pub top_waste_type: String,
}

/// Share of one waste type in the submission history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteTypeShare {
    pub name: String,
    pub count: u64,
    pub percentage: f64,
}

/// Submission count and CO2 savings for one day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    /// ISO date, e.g. "2026-08-23"
    pub date: String,
    pub count: u64,
    pub co2: f64,
}
