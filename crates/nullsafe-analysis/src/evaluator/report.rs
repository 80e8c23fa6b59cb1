//! Evaluation report of one root candidate.

use std::collections::BTreeSet;

use crate::cache::DownstreamImpactCache;
use crate::graph::Node;
use crate::model::{Fix, ReportedError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tag {
    Approve,
    #[default]
    Reject,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub root: Fix,
    pub tree: BTreeSet<Fix>,
    pub local_effect: i64,
    pub triggered_errors: Vec<ReportedError>,
    pub triggered_fixes_from_downstream: BTreeSet<Fix>,
    /// Set once the tree stops growing.
    pub finished: bool,
    /// Set once the root has been measured at least once.
    pub processed: bool,
    pub lower_bound: i64,
    pub upper_bound: i64,
    pub tag: Tag,
}

impl Report {
    /// A fresh report. The placeholder effect of 1 keeps it eligible under
    /// bailout until it is measured.
    pub fn new(root: Fix) -> Self {
        let tree = BTreeSet::from([root.clone()]);
        Self {
            root,
            tree,
            local_effect: 1,
            triggered_errors: Vec::new(),
            triggered_fixes_from_downstream: BTreeSet::new(),
            finished: false,
            processed: false,
            lower_bound: 0,
            upper_bound: 0,
            tag: Tag::Reject,
        }
    }

    /// Whether another depth level should grow this report.
    pub fn requires_further_process(&self, bailout: bool) -> bool {
        let exploring = !self.finished && (!bailout || self.local_effect > 0);
        exploring
            || self
                .triggered_fixes_from_downstream
                .iter()
                .any(|fix| !fix.source_in_target)
    }

    /// A node carrying this report's tree and last frontier.
    pub fn to_node(&self) -> Node {
        let mut node = Node::with_tree(self.root.clone(), self.tree.clone());
        node.triggered_errors = self.triggered_errors.clone();
        node.triggered_fixes_from_downstream = self.triggered_fixes_from_downstream.clone();
        node.effect = self.local_effect;
        node
    }

    /// Copies the measurement of `node` back into the report.
    pub fn absorb(&mut self, node: &Node) {
        self.tree = node.tree.clone();
        self.local_effect = node.effect;
        self.triggered_errors = node.triggered_errors.clone();
        self.triggered_fixes_from_downstream = node.triggered_fixes_from_downstream.clone();
        self.processed = true;
    }

    /// Candidates the next depth level adds to the tree.
    pub fn next_candidates(&self) -> BTreeSet<Fix> {
        if !self.processed {
            return BTreeSet::from([self.root.clone()]);
        }
        self.triggered_errors
            .iter()
            .flat_map(|e| e.resolving_fixes.iter())
            .chain(self.triggered_fixes_from_downstream.iter())
            .filter(|fix| !self.tree.contains(*fix))
            .map(Fix::in_target)
            .collect()
    }

    pub fn compute_bounds(&mut self, downstream: &dyn DownstreamImpactCache) {
        self.lower_bound = downstream.lower_bound(&self.tree);
        self.upper_bound = downstream.upper_bound(&self.tree);
    }

    pub fn approved(&self) -> bool {
        self.tag == Tag::Approve
    }
}
