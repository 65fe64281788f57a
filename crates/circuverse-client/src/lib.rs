//! Circuverse HTTP collaborators
//!
//! Glue code over hosted services, deliberately thin:
//! - [`AnalysisClient`] - the [`circuverse_engine::WasteAnalyzer`]
//!   implementation backed by the analyze-waste endpoint
//! - [`ChatClient`] / [`ChatTranscript`] - streaming chat with incremental
//!   SSE decoding
//! - [`StatsClient`] / [`StatsPoller`] - read-only aggregate statistics feed
//!
//! Every failure here degrades to a visibly different but still-functional
//! state upstream; none is fatal to the application.

#![warn(unreachable_pub)]

pub mod analysis;
pub mod chat;
pub mod config;
pub mod stats;

pub use analysis::AnalysisClient;
pub use chat::{
    suggested_reply, ChatClient, ChatMessage, ChatRole, ChatTranscript, SseAccumulator,
    StreamError,
};
pub use config::ApiConfig;
pub use stats::{StatsClient, StatsError, StatsPoller, DEFAULT_POLL_INTERVAL};
