//! Per-run node registry and conflict-aware grouping.

use std::collections::BTreeSet;

use nullsafe_core::errors::CacheError;
use nullsafe_core::types::collections::FxHashMap;
use petgraph::graph::UnGraph;

use super::coloring::{color_classes, greedy_coloring};
use super::Node;
use crate::cache::ErrorStore;
use crate::facts::MethodRegistry;
use crate::model::{Fix, Location};
use crate::processor::BatchResult;
use crate::region::RegionRegistry;

/// Nodes of one scheduling pass, in insertion order, at most one per root
/// location.
#[derive(Debug, Default)]
pub struct ConflictGraph {
    nodes: Vec<Node>,
    by_root: FxHashMap<Location, usize>,
}

impl ConflictGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single-candidate node for `root`, or returns the existing id.
    pub fn add_node(&mut self, root: Fix) -> usize {
        self.insert(Node::new(root))
    }

    /// Adds `node` unless its root is already present. Returns the id of the
    /// node registered for that root.
    pub fn insert(&mut self, mut node: Node) -> usize {
        if let Some(&id) = self.by_root.get(&node.root.location) {
            return id;
        }
        let id = self.nodes.len();
        node.id = id;
        self.by_root.insert(node.root.location.clone(), id);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn find(&self, root: &Fix) -> Option<&Node> {
        self.by_root.get(&root.location).map(|&id| &self.nodes[id])
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.by_root.clear();
    }

    /// Recomputes origins and impacted regions of every node.
    pub fn refresh_regions(
        &mut self,
        store: &ErrorStore,
        index: &dyn RegionRegistry,
    ) -> Result<(), CacheError> {
        for node in &mut self.nodes {
            node.set_origins(store)?;
            node.recollect_impacted_regions(index);
        }
        Ok(())
    }

    /// Partitions node ids into groups with pairwise disjoint regions.
    /// Groups come in color order; ids keep insertion order within a group.
    pub fn find_groups(&self) -> Vec<Vec<usize>> {
        let mut graph = UnGraph::<usize, ()>::with_capacity(self.nodes.len(), 0);
        let indices: Vec<_> = self.nodes.iter().map(|n| graph.add_node(n.id)).collect();
        for (i, a) in self.nodes.iter().enumerate() {
            for (j, b) in self.nodes.iter().enumerate().skip(i + 1) {
                if a.has_conflict_in_regions(b) {
                    graph.add_edge(indices[i], indices[j], ());
                }
            }
        }
        color_classes(&greedy_coloring(&graph))
    }

    /// Folds a processor result into node state.
    pub fn apply(&mut self, result: &BatchResult, methods: &MethodRegistry) -> Result<(), CacheError> {
        let empty = BTreeSet::new();
        for outcome in &result.outcomes {
            let batch = result.batches.get(outcome.batch).unwrap_or(&empty);
            let node = self
                .nodes
                .get_mut(outcome.node)
                .ok_or(CacheError::UnknownNode { node: outcome.node })?;
            node.update_status(
                outcome.local_effect,
                batch,
                outcome.triggered_errors.clone(),
                outcome.triggered_fixes_from_downstream.clone(),
                methods,
            );
            tracing::debug!(root = %node.root.location, effect = node.effect, "node measured");
        }
        Ok(())
    }
}
