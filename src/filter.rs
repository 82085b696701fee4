//! Notebook filtering.
//!
//! Users configure a comma-separated list of notebook names plus an
//! include/exclude direction. The list resolves against the notebook tree
//! into a [`FilterSet`] once per graph build; with cascade enabled the set
//! is transitively closed over the parent/child relation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::{Notebook, NotebookId};

/// Notebook filter options as configured by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Comma-separated notebook names. Unknown names are silently ignored.
    pub names: String,
    /// When true, only notes inside listed notebooks are kept; otherwise
    /// notes inside listed notebooks are dropped.
    pub is_include_filter: bool,
    /// Extend the filter to every descendant of a listed notebook.
    pub cascade_children: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            names: String::new(),
            is_include_filter: false,
            cascade_children: true,
        }
    }
}

impl FilterConfig {
    /// Resolve the configured names against the notebook tree.
    pub fn resolve(&self, notebooks: &[Notebook]) -> FilterSet {
        let names: Vec<&str> = self
            .names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();

        let mut ids: BTreeSet<NotebookId> = notebooks
            .iter()
            .filter(|notebook| names.iter().any(|name| *name == notebook.title))
            .map(|notebook| notebook.id.clone())
            .collect();

        if self.cascade_children {
            // Notebooks form a tree, so a plain stack walk terminates.
            let mut stack: Vec<NotebookId> = ids.iter().cloned().collect();
            while let Some(parent) = stack.pop() {
                for child in notebooks
                    .iter()
                    .filter(|notebook| notebook.parent_id.as_ref() == Some(&parent))
                {
                    if ids.insert(child.id.clone()) {
                        stack.push(child.id.clone());
                    }
                }
            }
        }

        tracing::debug!(
            "resolved notebook filter: {} name(s) -> {} id(s), include={}",
            names.len(),
            ids.len(),
            self.is_include_filter
        );
        FilterSet {
            ids,
            is_include_filter: self.is_include_filter,
        }
    }
}

/// The resolved set of notebook ids the filter applies to. Recomputed per
/// graph build, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    ids: BTreeSet<NotebookId>,
    is_include_filter: bool,
}

impl FilterSet {
    /// Whether notes parented by `parent_id` belong in the graph.
    ///
    /// Membership XOR-combines with the filter direction: an include filter
    /// keeps only members of the set, an exclude filter drops them.
    pub fn should_include(&self, parent_id: &NotebookId) -> bool {
        self.ids.contains(parent_id) == self.is_include_filter
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
