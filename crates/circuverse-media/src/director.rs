//! Media director
//!
//! Bridges the engine's phase fan-out to the ambient side effects: on every
//! observed phase change it fires the matching audio cue and narration.
//! Strictly one-directional - nothing here writes back into the controller.

use crate::audio::{AudioService, CueKind};
use crate::narration::Narrator;
use circuverse_engine::PhaseSnapshot;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Observes phase snapshots and triggers audio and narration
#[derive(Debug)]
pub struct MediaDirector {
    audio: Arc<AudioService>,
    narrator: Arc<Narrator>,
    task: Option<JoinHandle<()>>,
}

impl MediaDirector {
    /// Director over the given services
    #[must_use]
    pub fn new(audio: Arc<AudioService>, narrator: Arc<Narrator>) -> Self {
        Self {
            audio,
            narrator,
            task: None,
        }
    }

    /// Audio service in use
    #[inline]
    #[must_use]
    pub fn audio(&self) -> &Arc<AudioService> {
        &self.audio
    }

    /// Narrator in use
    #[inline]
    #[must_use]
    pub fn narrator(&self) -> &Arc<Narrator> {
        &self.narrator
    }

    /// Start observing a phase subscription
    ///
    /// Replaces any previous attachment. The observer task ends when the
    /// controller side of the channel is dropped.
    pub fn attach(&mut self, mut rx: watch::Receiver<PhaseSnapshot>) {
        self.detach();
        let audio = Arc::clone(&self.audio);
        let narrator = Arc::clone(&self.narrator);

        self.task = Some(tokio::spawn(async move {
            let mut last_phase = rx.borrow_and_update().phase;
            while rx.changed().await.is_ok() {
                let snapshot = *rx.borrow_and_update();
                if snapshot.phase == last_phase {
                    continue;
                }
                last_phase = snapshot.phase;
                tracing::debug!(phase = %snapshot.phase, "media director observed transition");
                audio.trigger(CueKind::for_phase(snapshot.phase));
                narrator.narrate(snapshot.phase);
            }
        }));
    }

    /// Stop observing
    pub fn detach(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for MediaDirector {
    fn drop(&mut self) {
        self.detach();
    }
}
