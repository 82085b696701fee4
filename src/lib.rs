//! # notegraph-core
//!
//! An incrementally maintained link-graph engine for personal knowledge
//! bases. Given a read-only note store, it builds a node/edge graph
//! re-centered on whichever note the user is viewing, and pushes a fresh
//! snapshot to a polling renderer only when the graph meaningfully changed.
//!
//! ## Overview
//!
//! The engine sits between two collaborators it does not implement: the
//! note store (queried for notes, notebooks, and the current selection) and
//! the rendering surface (a force-directed view that long-polls for
//! snapshots and sends navigation requests back).
//!
//! - **[`links`]**: extracts linked note ids from markdown bodies,
//!   resolving and stripping in-document anchors
//! - **[`filter`]**: resolves configured notebook names into the excluded
//!   (or exclusively included) notebook id set, optionally cascading to
//!   child notebooks
//! - **[`builder`]**: the bounded breadth-first traversal that turns the
//!   store into a [`model::GraphData`] snapshot under degree and node
//!   budgets
//! - **[`detector`]**: decides per storage event whether to rebuild fully,
//!   re-center cheaply, or do nothing (and drops everything mid-sync)
//! - **[`channel`]**: the rendez-vous handing snapshots to a single
//!   outstanding renderer poll, in arrival order
//! - **[`engine`]**: the session object wiring all of the above to a
//!   [`store::NoteStore`] and a [`config::SettingsProvider`]
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use notegraph_core::{
//!     config::{GraphSettings, MemorySettingsProvider},
//!     engine::GraphEngine,
//!     event::StoreEventKind,
//!     model::NoteId,
//!     store::MemoryNoteStore,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), notegraph_core::NoteGraphError> {
//! let store = Arc::new(MemoryNoteStore::new());
//! store.insert_note_with_body("a", "Alpha", "nb1", "See [Beta](:/b).");
//! store.insert_note_with_body("b", "Beta", "nb1", "");
//! store.select(Some(NoteId::from("a")));
//!
//! let settings = Arc::new(MemorySettingsProvider::new(GraphSettings::default()));
//! let engine = GraphEngine::new(store.clone(), settings);
//!
//! engine.handle_event(StoreEventKind::FirstLoad)?;
//! let change = engine.poll().await?;
//! assert_eq!(change.data.nodes.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error tolerance
//!
//! Anomalies degrade to a smaller or unchanged graph instead of surfacing
//! failures: missing link destinations are omitted, unresolvable filter
//! names are ignored, and an absent note selection yields an empty graph.

pub mod builder;
pub mod channel;
pub mod config;
pub mod detector;
pub mod engine;
pub mod error;
pub mod event;
pub mod filter;
pub mod links;
pub mod model;
pub mod store;

pub use error::*;
