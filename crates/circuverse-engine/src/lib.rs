//! Circuverse Engine - phase state machine and run sequencing
//!
//! The engine owns the one piece of multi-component coordination in the
//! system: a [`PhaseController`] holding the current phase (0..=4), a running
//! flag and the latest analysis, plus a [`SequenceEngine`] that drives the
//! scripted 0 -> 4 traversal while the external analysis runs concurrently.
//!
//! Fan-out is a `tokio::sync::watch` channel of [`PhaseSnapshot`] values;
//! dozens of independent consumers subscribe and decide for themselves what
//! the current phase means. Stale asynchronous completions are discarded via
//! a monotonic run generation.
//!
//! # Example
//!
//! ```rust,ignore
//! use circuverse_engine::{SequenceEngine, SequenceTiming};
//! use std::sync::Arc;
//!
//! # async fn example(analyzer: Arc<dyn circuverse_engine::WasteAnalyzer>) {
//! let engine = SequenceEngine::new(analyzer)
//!     .with_timing(SequenceTiming::from_millis(1500, 2000, 2000));
//!
//! let report = engine.run("10,000 tons of plastic bottles").await.unwrap();
//! assert_eq!(report.phases.len(), 5);
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod analyzer;
pub mod controller;
pub mod error;
pub mod sequence;

pub use analyzer::WasteAnalyzer;
pub use controller::{PhaseController, PhaseSnapshot};
pub use error::{AnalysisError, EngineError};
pub use sequence::{RunReport, SequenceEngine, SequenceTiming};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
