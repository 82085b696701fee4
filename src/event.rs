use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::model::GraphData;

/// The storage-layer happenings the engine subscribes to. Each invokes the
/// change detector with the corresponding kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreEventKind {
    /// The body of the currently selected note changed.
    NoteChanged,
    /// A different note was selected in the editor.
    NoteSelectionChanged,
    /// A bulk synchronization began. Gates all other processing.
    SyncStarted,
    /// A bulk synchronization finished. Forces a rebuild.
    SyncCompleted,
    /// The user changed graph settings.
    SettingsChanged,
    /// Initial load, before any snapshot exists.
    FirstLoad,
}

impl Display for StoreEventKind {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            StoreEventKind::NoteChanged => write!(f, "NoteChanged"),
            StoreEventKind::NoteSelectionChanged => write!(f, "NoteSelectionChanged"),
            StoreEventKind::SyncStarted => write!(f, "SyncStarted"),
            StoreEventKind::SyncCompleted => write!(f, "SyncCompleted"),
            StoreEventKind::SettingsChanged => write!(f, "SettingsChanged"),
            StoreEventKind::FirstLoad => write!(f, "FirstLoad"),
        }
    }
}

/// A graph snapshot paired with the event that produced it. Queued in the
/// [`UpdateChannel`](crate::channel::UpdateChannel) and consumed exactly once
/// by the next renderer poll. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelChange {
    pub kind: StoreEventKind,
    pub data: GraphData,
}
