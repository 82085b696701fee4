//! Rendez-vous between the change detector and the polling renderer.
//!
//! Pending [`ModelChange`]s accumulate in a FIFO backlog. At most one
//! renderer poll may be outstanding at a time: an empty-backlog poll parks
//! on a single-slot oneshot and resolves when the next change is recorded,
//! with no timeout. Changes are delivered exactly once, in arrival order.

use parking_lot::Mutex;
use std::collections::VecDeque;
use tokio::sync::oneshot;

use crate::{error::NoteGraphError, event::ModelChange};

#[derive(Default)]
struct ChannelState {
    backlog: VecDeque<ModelChange>,
    pending: Option<oneshot::Sender<ModelChange>>,
}

#[derive(Default)]
pub struct UpdateChannel {
    state: Mutex<ChannelState>,
}

impl UpdateChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a change, handing it straight to a parked poll when one exists.
    ///
    /// Recording while earlier changes are still queued never overwrites
    /// them; the renderer drains the backlog by re-polling.
    pub fn record(&self, change: ModelChange) {
        let mut state = self.state.lock();
        tracing::debug!(
            "recording model change {} (backlog: {})",
            change.kind,
            state.backlog.len()
        );
        state.backlog.push_back(change);
        if let Some(tx) = state.pending.take() {
            if let Some(head) = state.backlog.pop_front() {
                // The poll future may have been dropped; keep the change.
                if let Err(rejected) = tx.send(head) {
                    state.backlog.push_front(rejected);
                }
            }
        }
    }

    /// Resolve with the oldest pending change, suspending while the backlog
    /// is empty. Idle graphs leave the poll parked indefinitely.
    ///
    /// Errors when a poll is already outstanding; a well-behaved renderer
    /// issues the next poll only after the previous one resolves.
    pub async fn await_next(&self) -> Result<ModelChange, NoteGraphError> {
        let rx = {
            let mut state = self.state.lock();
            if let Some(change) = state.backlog.pop_front() {
                tracing::debug!("delivering queued model change {}", change.kind);
                return Ok(change);
            }
            if state.pending.is_some() {
                return Err(NoteGraphError::Channel(
                    "a renderer poll is already outstanding".to_string(),
                ));
            }
            let (tx, rx) = oneshot::channel();
            state.pending = Some(tx);
            rx
        };
        rx.await
            .map_err(|_| NoteGraphError::Channel("update channel dropped".to_string()))
    }

    pub fn backlog_len(&self) -> usize {
        self.state.lock().backlog.len()
    }
}
