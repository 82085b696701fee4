//! Bounded graph construction.
//!
//! [`build`] turns the note store's contents into a renderable
//! [`GraphData`] snapshot: a breadth-first traversal outward from the
//! current note, bounded by a maximum separation degree and a node budget,
//! with filtered notebooks skipped entirely. Because admission happens in
//! BFS dequeue order, nodes enter in nondecreasing degree and the budget
//! always drops the farthest notes first.

use petgraph::{graph::NodeIndex, Direction, Graph};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::{
    config::GraphSettings,
    filter::FilterSet,
    links::strip_anchor,
    model::{GraphData, GraphEdge, GraphNode, Note, NoteId},
};

/// Forward and reverse adjacency over the full note set.
///
/// Interned into a directed petgraph so that backlinks fall out of edge
/// direction instead of requiring a second hand-maintained index. Edges to
/// notes absent from the set (deleted destinations, resources) are never
/// added.
#[derive(Debug, Default)]
pub struct LinkIndex {
    graph: Graph<NoteId, ()>,
    indices: BTreeMap<NoteId, NodeIndex>,
}

impl LinkIndex {
    pub fn from_notes<'a, I>(notes: I) -> Self
    where
        I: IntoIterator<Item = &'a Note>,
    {
        let mut graph = Graph::new();
        let mut indices = BTreeMap::new();
        let notes: Vec<&Note> = notes.into_iter().collect();

        for note in notes.iter() {
            if !indices.contains_key(&note.id) {
                let index = graph.add_node(note.id.clone());
                indices.insert(note.id.clone(), index);
            }
        }

        for note in notes.iter() {
            let source_idx = indices[&note.id];
            for raw in note.links.iter() {
                let target = strip_anchor(raw);
                if let Some(&target_idx) = indices.get(target) {
                    graph.update_edge(source_idx, target_idx, ());
                }
            }
        }

        LinkIndex { graph, indices }
    }

    pub fn as_graph(&self) -> &Graph<NoteId, ()> {
        &self.graph
    }

    /// Outgoing link targets of `id`, plus its backlink sources when
    /// `include_backlinks` is set. Unknown ids have no neighbors.
    pub fn neighbors(&self, id: &NoteId, include_backlinks: bool) -> Vec<NoteId> {
        let Some(&index) = self.indices.get(id) else {
            return Vec::new();
        };
        let mut out: Vec<NoteId> = self
            .graph
            .neighbors_directed(index, Direction::Outgoing)
            .map(|idx| self.graph[idx].clone())
            .collect();
        if include_backlinks {
            out.extend(
                self.graph
                    .neighbors_directed(index, Direction::Incoming)
                    .map(|idx| self.graph[idx].clone()),
            );
        }
        out
    }
}

/// Build the graph snapshot centered on `current`.
///
/// - `settings.max_degree == 0` disables the degree bound and puts the
///   whole store in scope, disconnected notes included.
/// - The current note is never excluded by its own notebook filter;
///   otherwise editing inside a filtered notebook would show an empty graph.
/// - Filtered notes are skipped entirely: not traversed through, not
///   counted toward the budget.
/// - Every emitted edge has both endpoints in the emitted node set.
pub fn build(
    current: &NoteId,
    notes: &BTreeMap<NoteId, Note>,
    filter: &FilterSet,
    settings: &GraphSettings,
) -> GraphData {
    let index = LinkIndex::from_notes(notes.values());

    // BFS admission order doubles as the output node order.
    let mut order: Vec<NoteId> = Vec::new();
    let mut visited: BTreeSet<NoteId> = BTreeSet::new();
    let mut frontier: VecDeque<(NoteId, usize)> = VecDeque::new();
    frontier.push_back((current.clone(), 0));

    while let Some((id, degree)) = frontier.pop_front() {
        if order.len() >= settings.max_nodes {
            tracing::debug!(
                "node budget of {} reached at degree {}, truncating traversal",
                settings.max_nodes,
                degree
            );
            break;
        }
        if visited.contains(&id) {
            continue;
        }
        let Some(note) = notes.get(&id) else {
            // Deleted or never-fetched destination, recovered by omission.
            continue;
        };
        if id != *current && !filter.should_include(&note.parent_id) {
            continue;
        }

        visited.insert(id.clone());
        order.push(id.clone());

        if settings.max_degree == 0 || degree < settings.max_degree {
            for neighbor in index.neighbors(&id, settings.include_backlinks) {
                if !visited.contains(&neighbor) {
                    frontier.push_back((neighbor, degree + 1));
                }
            }
        }
    }

    // A zero degree bound puts the whole store in scope, not just the
    // component reachable from the current note. The reachable component is
    // already admitted (closest-first), so remaining unfiltered notes fill
    // whatever budget is left, in store order.
    if settings.max_degree == 0 {
        for (id, note) in notes.iter() {
            if order.len() >= settings.max_nodes {
                break;
            }
            if visited.contains(id) {
                continue;
            }
            if !filter.should_include(&note.parent_id) {
                continue;
            }
            visited.insert(id.clone());
            order.push(id.clone());
        }
    }

    let mut nodes = Vec::with_capacity(order.len());
    let mut edges = Vec::new();
    for id in order.iter() {
        let note = &notes[id];
        let targets: BTreeSet<&str> = note.links.iter().map(|raw| strip_anchor(raw)).collect();
        for target in targets {
            if !visited.contains(target) {
                continue;
            }
            edges.push(GraphEdge {
                source: id.clone(),
                target: NoteId::from(target),
                focused: false,
            });
        }
        nodes.push(GraphNode {
            id: id.clone(),
            title: note.title.clone(),
            focused: false,
        });
    }

    let mut data = GraphData {
        nodes,
        edges,
        current_note_id: None,
        node_font_size: settings.node_font_size,
        node_distance_ratio: settings.node_distance_ratio(),
        include_backlinks: settings.include_backlinks,
    };
    // Focus flags are one computation shared with selection changes.
    data.recenter(Some(current.clone()));
    tracing::debug!(
        "built graph centered on {}: {} nodes, {} edges",
        current,
        data.nodes.len(),
        data.edges.len()
    );
    data
}
