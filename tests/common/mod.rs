//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use std::sync::Arc;

use notegraph_core::{
    config::{GraphSettings, MemorySettingsProvider},
    engine::GraphEngine,
    model::{Notebook, NotebookId, NoteId},
    store::MemoryNoteStore,
};

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times; subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// A small note base: `a -> b -> c` in "Main", `p` alone in "Private",
/// with "a" selected.
#[allow(dead_code)]
pub fn populate_store(store: &MemoryNoteStore) {
    store.add_notebook(Notebook {
        id: NotebookId::from("nb-main"),
        title: "Main".to_string(),
        parent_id: None,
    });
    store.add_notebook(Notebook {
        id: NotebookId::from("nb-private"),
        title: "Private".to_string(),
        parent_id: None,
    });
    store.insert_note_with_body("a", "Alpha", "nb-main", "See [Beta](:/b).");
    store.insert_note_with_body("b", "Beta", "nb-main", "See [Gamma](:/c#intro).");
    store.insert_note_with_body("c", "Gamma", "nb-main", "");
    store.insert_note_with_body("p", "Personal", "nb-private", "");
    store.select(Some(NoteId::from("a")));
}

/// Engine over a populated memory store with default settings.
#[allow(dead_code)]
pub fn test_engine() -> (Arc<MemoryNoteStore>, Arc<MemorySettingsProvider>, GraphEngine) {
    let store = Arc::new(MemoryNoteStore::new());
    populate_store(&store);
    let settings = Arc::new(MemorySettingsProvider::new(GraphSettings::default()));
    let engine = GraphEngine::new(store.clone(), settings.clone());
    (store, settings, engine)
}
