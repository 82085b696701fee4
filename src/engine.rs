//! The engine session object.
//!
//! [`GraphEngine`] ties the store handle, settings provider, change
//! detector, and update channel together for one plugin lifetime, and is
//! the surface the host wires its event subscriptions and renderer
//! messages to. Handlers run to completion one at a time (the detector sits
//! behind a mutex); suspension only happens at the renderer's poll
//! boundary.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::{
    channel::UpdateChannel,
    config::SettingsProvider,
    detector::ChangeDetector,
    error::NoteGraphError,
    event::{ModelChange, StoreEventKind},
    model::{GraphData, NoteId},
    store::NoteStore,
};

pub struct GraphEngine {
    store: Arc<dyn NoteStore>,
    settings: Arc<dyn SettingsProvider>,
    detector: Mutex<ChangeDetector>,
    channel: UpdateChannel,
}

impl GraphEngine {
    pub fn new(store: Arc<dyn NoteStore>, settings: Arc<dyn SettingsProvider>) -> Self {
        GraphEngine {
            store,
            settings,
            detector: Mutex::new(ChangeDetector::new()),
            channel: UpdateChannel::new(),
        }
    }

    /// Entry point for the host's storage and settings subscriptions.
    /// Records a model change when the detector decides one is due.
    pub fn handle_event(&self, kind: StoreEventKind) -> Result<(), NoteGraphError> {
        let settings = self.settings.get_settings()?;
        let mut detector = self.detector.lock();
        if let Some(change) = detector.handle(kind, self.store.as_ref(), &settings) {
            self.channel.record(change);
        } else {
            tracing::debug!("{kind} produced no model change");
        }
        Ok(())
    }

    /// Long-poll for the next model change. Suspends until one is recorded;
    /// the renderer re-polls immediately after consuming each result.
    pub async fn poll(&self) -> Result<ModelChange, NoteGraphError> {
        self.channel.await_next().await
    }

    /// Immediate full snapshot for the renderer's initial load, building
    /// one if none exists yet.
    pub fn update(&self) -> Result<GraphData, NoteGraphError> {
        let settings = self.settings.get_settings()?;
        let mut detector = self.detector.lock();
        Ok(detector.snapshot_or_build(self.store.as_ref(), &settings))
    }

    /// Number of recorded changes not yet consumed by a poll.
    pub fn pending_changes(&self) -> usize {
        self.channel.backlog_len()
    }

    /// Renderer navigation request, forwarded to the store.
    pub fn navigate_to(&self, id: &NoteId) {
        tracing::debug!("navigating to note {id}");
        self.store.open_note(id);
    }
}
