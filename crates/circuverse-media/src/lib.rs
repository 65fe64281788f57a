//! Circuverse ambient media
//!
//! Sound and narration for the transformation narrative. Everything here is a
//! one-way consumer of the engine's phase fan-out:
//! - [`AudioService`] synthesizes tone cues through a pluggable
//!   [`AudioBackend`], with an explicit `init`/`dispose` lifecycle
//! - [`Narrator`] maps each phase to its narration script
//! - [`MediaDirector`] subscribes to phase snapshots and fires both

#![warn(unreachable_pub)]

pub mod audio;
pub mod director;
pub mod narration;

pub use audio::{AudioBackend, AudioService, CueKind, NullBackend, ToneCue, Waveform};
pub use director::MediaDirector;
pub use narration::{NarrationStep, Narrator};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
