//! Analyzer seam
//!
//! The engine never talks to the network directly; it drives a
//! [`WasteAnalyzer`] implementation. Production code plugs in the HTTP
//! client, tests plug in stubs.

use crate::error::AnalysisError;
use async_trait::async_trait;
use circuverse_model::AnalysisResult;

/// External waste classification collaborator
///
/// # Contract
/// - On success the result is fully populated (wire-format defaults already
///   applied), so downstream consumers never see partial data.
/// - At most one call is in flight per run; the controller's running guard
///   enforces this.
#[async_trait]
pub trait WasteAnalyzer: Send + Sync {
    /// Classify a free-form waste scenario description
    async fn analyze(&self, input: &str) -> Result<AnalysisResult, AnalysisError>;
}

#[async_trait]
impl<T: WasteAnalyzer + ?Sized> WasteAnalyzer for std::sync::Arc<T> {
    async fn analyze(&self, input: &str) -> Result<AnalysisResult, AnalysisError> {
        (**self).analyze(input).await
    }
}
