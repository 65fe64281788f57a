//! Circuverse data model
//!
//! Shared value types for the phase-driven visualization engine:
//! - [`Phase`] - the narrative step (0..=4) every consumer keys on
//! - [`WasteCategory`] - tagged classification of a waste scenario
//! - [`AnalysisResult`] / [`RawAnalysis`] - structured AI classification
//!   with wire-format normalization
//! - [`GlobalStats`] - aggregate statistics feed

#![warn(unreachable_pub)]

pub mod analysis;
pub mod category;
pub mod phase;
pub mod stats;

pub use analysis::{AnalysisResult, RawAnalysis, DEFAULT_CIRCULAR_SCORE, DEFAULT_RECYCLABILITY};
pub use category::WasteCategory;
pub use phase::Phase;
pub use stats::{DailyActivity, GlobalStats, WasteTypeShare};
