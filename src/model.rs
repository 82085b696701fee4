//! Value types shared across the engine: the note store inputs and the
//! graph snapshot handed to the renderer.

use serde::{Deserialize, Serialize};
use std::{
    borrow::Borrow,
    collections::BTreeSet,
    fmt::{self, Display, Formatter},
};

use crate::error::NoteGraphError;

/// Unique identifier of a note, as assigned by the note store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct NoteId(pub String);

impl NoteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NoteId {
    fn from(src: &str) -> NoteId {
        NoteId(src.to_string())
    }
}

impl From<String> for NoteId {
    fn from(src: String) -> NoteId {
        NoteId(src)
    }
}

impl Borrow<str> for NoteId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of a notebook.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct NotebookId(pub String);

impl From<&str> for NotebookId {
    fn from(src: &str) -> NotebookId {
        NotebookId(src.to_string())
    }
}

impl Display for NotebookId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A note as read from the store. `links` holds raw outgoing targets which
/// may still carry `#fragment` suffixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub parent_id: NotebookId,
    pub links: Vec<String>,
}

/// A notebook record. `parent_id` is `None` for top-level notebooks, so the
/// full set forms a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    pub id: NotebookId,
    pub title: String,
    pub parent_id: Option<NotebookId>,
}

/// A node in the rendered graph. `focused` is true iff the node is the
/// current note or adjacent to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NoteId,
    pub title: String,
    pub focused: bool,
}

/// A directed edge in the rendered graph. `focused` is true iff either
/// endpoint is the current note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: NoteId,
    pub target: NoteId,
    pub focused: bool,
}

/// One snapshot of the graph, valid at a single point in time. Treated as
/// immutable once queued for the renderer; the change detector only ever
/// mutates its own copy.
///
/// Invariant: every edge's source and target appear in `nodes`. The builder
/// drops edges to filtered-out or missing notes instead of emitting them
/// dangling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub current_note_id: Option<NoteId>,
    pub node_font_size: u32,
    pub node_distance_ratio: f64,
    pub include_backlinks: bool,
}

impl GraphData {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Re-point the snapshot at a newly selected note and recompute every
    /// focus flag, without refetching anything.
    pub fn recenter(&mut self, new_current: Option<NoteId>) {
        for edge in &mut self.edges {
            edge.focused = new_current
                .as_ref()
                .map(|current| edge.source == *current || edge.target == *current)
                .unwrap_or(false);
        }
        let mut focused: BTreeSet<NoteId> = self
            .edges
            .iter()
            .filter(|edge| edge.focused)
            .flat_map(|edge| [edge.source.clone(), edge.target.clone()])
            .collect();
        if let Some(current) = &new_current {
            focused.insert(current.clone());
        }
        for node in &mut self.nodes {
            node.focused = focused.contains(&node.id);
        }
        self.current_note_id = new_current;
    }

    /// Serialize the snapshot for handoff across the renderer's
    /// message-passing boundary.
    pub fn to_json(&self) -> Result<String, NoteGraphError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Edge endpoints referenced by `edges` but absent from `nodes`. Always
    /// empty for builder output; exposed so embedders can validate
    /// snapshots they construct themselves.
    pub fn dangling_endpoints(&self) -> Vec<NoteId> {
        let node_ids: BTreeSet<&NoteId> = self.nodes.iter().map(|n| &n.id).collect();
        let mut missing = Vec::new();
        for edge in &self.edges {
            if !node_ids.contains(&edge.source) {
                missing.push(edge.source.clone());
            }
            if !node_ids.contains(&edge.target) {
                missing.push(edge.target.clone());
            }
        }
        missing.sort();
        missing.dedup();
        missing
    }
}
