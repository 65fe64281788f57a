//! Error types for the phase engine
//!
//! [`AnalysisError`] is the failure surface of the external classification
//! collaborator; [`EngineError`] covers the run sequencing itself. Analysis
//! failures never abort a run - they are recorded and the visual narrative
//! continues.

/// Failure of the external waste classification
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Endpoint answered with a non-success status
    #[error("analysis endpoint error ({status}): {message}")]
    Endpoint {
        /// HTTP status code
        status: u16,
        /// Error message from the endpoint body
        message: String,
    },

    /// Network-level failure reaching the endpoint
    #[error("analysis transport failed: {0}")]
    Transport(String),

    /// Endpoint answered 2xx but the body was not a valid analysis
    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),

    /// Request exceeded the configured deadline
    #[error("analysis timed out after {0}s")]
    Timeout(u64),
}

impl AnalysisError {
    /// Whether retrying the same request could plausibly succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }
}

/// Failure of a run sequence
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A run is already in progress
    #[error("a transformation run is already in progress")]
    RunInProgress,

    /// The waste input was empty after trimming
    #[error("waste input is empty")]
    EmptyInput,

    /// The run was superseded by a reset or a newer run
    #[error("run superseded (generation {stale}, current {current})")]
    Superseded {
        /// Generation captured when the run started
        stale: u64,
        /// Generation at the time of the failed transition
        current: u64,
    },
}
