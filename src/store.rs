//! The note-store collaborator seam.
//!
//! The engine only ever reads from the store; mutation happens in the host
//! application and surfaces as [`StoreEventKind`](crate::event::StoreEventKind)
//! notifications. Full iteration (`notes`) is part of the contract because
//! the graph builder derives the reverse adjacency for backlinks from it.

use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::{
    links::extract_links,
    model::{Note, Notebook, NoteId, NotebookId},
};

pub trait NoteStore: Send + Sync {
    /// The note currently open in the editor, if any.
    fn selected_note_id(&self) -> Option<NoteId>;

    fn note(&self, id: &NoteId) -> Option<Note>;

    /// Every note in the store.
    fn notes(&self) -> BTreeMap<NoteId, Note>;

    fn notebooks(&self) -> Vec<Notebook>;

    /// Navigate the editor to a note. Fire-and-forget.
    fn open_note(&self, id: &NoteId);
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    notes: BTreeMap<NoteId, Note>,
    notebooks: Vec<Notebook>,
    selected: Option<NoteId>,
    opened: Vec<NoteId>,
}

/// BTreeMap-backed [`NoteStore`] for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    inner: RwLock<MemoryStoreInner>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_note(&self, note: Note) {
        self.inner.write().notes.insert(note.id.clone(), note);
    }

    /// Insert or replace a note, deriving its link list from `body`.
    pub fn insert_note_with_body(
        &self,
        id: impl Into<NoteId>,
        title: &str,
        parent_id: impl Into<NotebookId>,
        body: &str,
    ) {
        let id = id.into();
        let links = extract_links(body)
            .into_iter()
            .map(|note_id| note_id.0)
            .collect();
        self.insert_note(Note {
            id,
            title: title.to_string(),
            parent_id: parent_id.into(),
            links,
        });
    }

    pub fn remove_note(&self, id: &NoteId) {
        self.inner.write().notes.remove(id);
    }

    pub fn add_notebook(&self, notebook: Notebook) {
        self.inner.write().notebooks.push(notebook);
    }

    pub fn select(&self, id: Option<NoteId>) {
        self.inner.write().selected = id;
    }

    /// Ids passed to [`NoteStore::open_note`], oldest first.
    pub fn opened(&self) -> Vec<NoteId> {
        self.inner.read().opened.clone()
    }
}

impl NoteStore for MemoryNoteStore {
    fn selected_note_id(&self) -> Option<NoteId> {
        self.inner.read().selected.clone()
    }

    fn note(&self, id: &NoteId) -> Option<Note> {
        self.inner.read().notes.get(id).cloned()
    }

    fn notes(&self) -> BTreeMap<NoteId, Note> {
        self.inner.read().notes.clone()
    }

    fn notebooks(&self) -> Vec<Notebook> {
        self.inner.read().notebooks.clone()
    }

    fn open_note(&self, id: &NoteId) {
        let mut inner = self.inner.write();
        inner.opened.push(id.clone());
        inner.selected = Some(id.clone());
    }
}
