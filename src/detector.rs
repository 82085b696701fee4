//! Event-driven change detection.
//!
//! [`ChangeDetector`] decides, per storage event, whether the graph must be
//! rebuilt fully, cheaply re-centered, or left untouched. It owns the
//! current snapshot and the comparison baselines (previous propagated
//! snapshot, previous link set of the selected note) so it stays
//! independently constructible and testable; nothing lives in module-level
//! state.

use std::collections::BTreeSet;

use crate::{
    builder,
    config::GraphSettings,
    event::{ModelChange, StoreEventKind},
    links::strip_anchor,
    model::{GraphData, NoteId},
    store::NoteStore,
};

#[derive(Default)]
pub struct ChangeDetector {
    /// Last-built snapshot, whether or not it was propagated.
    current: Option<GraphData>,
    /// Last snapshot actually handed to the update channel. Full rebuilds
    /// compare against this to suppress no-op propagations.
    previous: Option<GraphData>,
    /// Link set of the selected note as of its last recorded change.
    prev_note_links: Option<BTreeSet<NoteId>>,
    /// While a bulk sync runs, every event is dropped, not queued. Only
    /// sync-complete resumes processing, and it forces a rebuild.
    sync_ongoing: bool,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<&GraphData> {
        self.current.as_ref()
    }

    /// Current snapshot, building one when none exists yet. Used for the
    /// renderer's immediate `update` request on initial load.
    pub fn snapshot_or_build(
        &mut self,
        store: &dyn NoteStore,
        settings: &GraphSettings,
    ) -> GraphData {
        if self.current.is_none() {
            self.current = Some(fetch(store, settings));
        }
        self.current.clone().unwrap_or_else(|| fetch(store, settings))
    }

    /// Process one storage event. Returns the change to propagate, if the
    /// graph meaningfully changed.
    pub fn handle(
        &mut self,
        kind: StoreEventKind,
        store: &dyn NoteStore,
        settings: &GraphSettings,
    ) -> Option<ModelChange> {
        match kind {
            StoreEventKind::SyncStarted => {
                self.sync_ongoing = true;
                return None;
            }
            StoreEventKind::SyncCompleted => {
                self.sync_ongoing = false;
            }
            _ if self.sync_ongoing => {
                tracing::debug!("sync in progress, dropping {kind}");
                return None;
            }
            _ => {}
        }

        let data = if self.current.is_none() {
            // First load: skip the event dispatch, always build.
            let fresh = fetch(store, settings);
            self.current = Some(fresh.clone());
            Some(fresh)
        } else {
            match kind {
                StoreEventKind::NoteChanged => self.on_note_changed(store, settings),
                StoreEventKind::NoteSelectionChanged => self.on_selection_changed(store),
                StoreEventKind::SettingsChanged
                | StoreEventKind::SyncCompleted
                | StoreEventKind::FirstLoad
                | StoreEventKind::SyncStarted => self.on_rebuild(store, settings),
            }
        };

        let data = data?;
        self.previous = Some(data.clone());
        Some(ModelChange { kind, data })
    }

    /// Rebuild only when the selected note's extracted link set actually
    /// differs from the previously recorded one. Keystroke-adjacent edits
    /// that leave links alone must not force the renderer to re-layout.
    fn on_note_changed(
        &mut self,
        store: &dyn NoteStore,
        settings: &GraphSettings,
    ) -> Option<GraphData> {
        let links = store
            .selected_note_id()
            .and_then(|id| store.note(&id))
            .map(|note| {
                note.links
                    .iter()
                    .map(|raw| NoteId::from(strip_anchor(raw)))
                    .collect::<BTreeSet<NoteId>>()
            })
            .unwrap_or_default();

        if self.prev_note_links.as_ref() == Some(&links) {
            tracing::debug!("note changed but links did not, skipping rebuild");
            return None;
        }
        self.prev_note_links = Some(links);
        let fresh = fetch(store, settings);
        self.current = Some(fresh.clone());
        Some(fresh)
    }

    /// Selection changes re-center the existing snapshot in place: new
    /// current note id, recomputed focus flags, no data refetch. Always
    /// counts as a change.
    fn on_selection_changed(&mut self, store: &dyn NoteStore) -> Option<GraphData> {
        let new_current = store.selected_note_id();
        let data = self.current.as_mut()?;
        data.recenter(new_current);
        Some(data.clone())
    }

    /// Unconditional rebuild, propagated only when structurally different
    /// from the last propagated snapshot.
    fn on_rebuild(&mut self, store: &dyn NoteStore, settings: &GraphSettings) -> Option<GraphData> {
        let fresh = fetch(store, settings);
        self.current = Some(fresh.clone());
        if self.previous.as_ref() == Some(&fresh) {
            tracing::debug!("rebuilt graph is structurally unchanged, suppressing");
            return None;
        }
        Some(fresh)
    }
}

fn fetch(store: &dyn NoteStore, settings: &GraphSettings) -> GraphData {
    let notebooks = store.notebooks();
    let filter = settings.filter.resolve(&notebooks);
    match store.selected_note_id() {
        Some(current) => builder::build(&current, &store.notes(), &filter, settings),
        // No selected note is an empty-graph condition, not an error.
        None => GraphData {
            nodes: vec![],
            edges: vec![],
            current_note_id: None,
            node_font_size: settings.node_font_size,
            node_distance_ratio: settings.node_distance_ratio(),
            include_backlinks: settings.include_backlinks,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryNoteStore;

    fn fixture() -> (MemoryNoteStore, ChangeDetector, GraphSettings) {
        let store = MemoryNoteStore::new();
        store.insert_note_with_body("a", "Alpha", "nb1", "links to [b](:/b)");
        store.insert_note_with_body("b", "Beta", "nb1", "");
        store.select(Some(NoteId::from("a")));
        (store, ChangeDetector::new(), GraphSettings::default())
    }

    #[test_log::test]
    fn first_event_always_builds() {
        let (store, mut detector, settings) = fixture();
        let change = detector
            .handle(StoreEventKind::FirstLoad, &store, &settings)
            .unwrap();
        assert_eq!(change.data.nodes.len(), 2);
        assert_eq!(change.data.current_note_id, Some(NoteId::from("a")));
    }

    #[test_log::test]
    fn unchanged_links_produce_no_change() {
        let (store, mut detector, settings) = fixture();
        detector.handle(StoreEventKind::FirstLoad, &store, &settings);

        // Record a baseline link set, then report a body edit that leaves
        // the links alone.
        let first = detector.handle(StoreEventKind::NoteChanged, &store, &settings);
        assert!(first.is_some());
        let second = detector.handle(StoreEventKind::NoteChanged, &store, &settings);
        assert!(second.is_none());
    }

    #[test_log::test]
    fn changed_links_force_a_rebuild() {
        let (store, mut detector, settings) = fixture();
        detector.handle(StoreEventKind::FirstLoad, &store, &settings);
        detector.handle(StoreEventKind::NoteChanged, &store, &settings);

        store.insert_note_with_body("a", "Alpha", "nb1", "now links to [b](:/b) and [c](:/c)");
        store.insert_note_with_body("c", "Gamma", "nb1", "");
        let change = detector
            .handle(StoreEventKind::NoteChanged, &store, &settings)
            .unwrap();
        assert_eq!(change.data.nodes.len(), 3);
    }

    #[test_log::test]
    fn selection_change_recenters_without_refetch() {
        let (store, mut detector, settings) = fixture();
        detector.handle(StoreEventKind::FirstLoad, &store, &settings);

        // Remove b from the store; a re-center must keep showing the stale
        // snapshot since it does not refetch.
        store.remove_note(&NoteId::from("b"));
        store.select(Some(NoteId::from("b")));
        let change = detector
            .handle(StoreEventKind::NoteSelectionChanged, &store, &settings)
            .unwrap();
        assert_eq!(change.data.current_note_id, Some(NoteId::from("b")));
        assert_eq!(change.data.nodes.len(), 2);
        for node in &change.data.nodes {
            assert!(node.focused, "a-b edge keeps both endpoints focused");
        }
    }

    #[test_log::test]
    fn sync_suppresses_events_until_complete() {
        let (store, mut detector, settings) = fixture();
        detector.handle(StoreEventKind::FirstLoad, &store, &settings);

        assert!(detector
            .handle(StoreEventKind::SyncStarted, &store, &settings)
            .is_none());
        store.insert_note_with_body("c", "Gamma", "nb1", "");
        assert!(detector
            .handle(StoreEventKind::NoteChanged, &store, &settings)
            .is_none());
        assert!(detector
            .handle(StoreEventKind::SettingsChanged, &store, &settings)
            .is_none());

        let change = detector
            .handle(StoreEventKind::SyncCompleted, &store, &settings)
            .unwrap();
        assert_eq!(change.kind, StoreEventKind::SyncCompleted);
        assert_eq!(change.data.nodes.len(), 3);
    }

    #[test_log::test]
    fn identical_rebuild_is_suppressed() {
        let (store, mut detector, settings) = fixture();
        detector.handle(StoreEventKind::FirstLoad, &store, &settings);
        // Nothing changed in the store, so the rebuild compares equal.
        assert!(detector
            .handle(StoreEventKind::SettingsChanged, &store, &settings)
            .is_none());
    }

    #[test_log::test]
    fn no_selected_note_yields_empty_graph() {
        let store = MemoryNoteStore::new();
        let mut detector = ChangeDetector::new();
        let settings = GraphSettings::default();
        let change = detector
            .handle(StoreEventKind::FirstLoad, &store, &settings)
            .unwrap();
        assert!(change.data.is_empty());
        assert_eq!(change.data.current_note_id, None);
    }
}
