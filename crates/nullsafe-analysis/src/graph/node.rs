//! Candidate trees: the unit the scheduler batches.

use std::collections::BTreeSet;

use nullsafe_core::errors::CacheError;

use crate::cache::ErrorStore;
use crate::facts::MethodRegistry;
use crate::model::{Fix, Location, Region, ReportedError};
use crate::region::RegionRegistry;

/// A root candidate plus every candidate that must be applied with it.
#[derive(Debug, Clone)]
pub struct Node {
    /// Dense id, assigned by the owning `ConflictGraph` in insertion order.
    pub id: usize,
    pub root: Fix,
    pub tree: BTreeSet<Fix>,
    /// Regions of baseline errors the root helps resolve.
    pub origins: BTreeSet<Region>,
    /// Cached impacted regions of `tree` plus `origins`.
    pub regions: BTreeSet<Region>,
    pub triggered_errors: Vec<ReportedError>,
    pub triggered_fixes_from_downstream: BTreeSet<Fix>,
    pub effect: i64,
    /// Whether the last `merge_triggered` grew the tree.
    pub changed: bool,
}

impl Node {
    pub fn new(root: Fix) -> Self {
        let tree = BTreeSet::from([root.clone()]);
        Self::with_tree(root, tree)
    }

    pub fn with_tree(root: Fix, mut tree: BTreeSet<Fix>) -> Self {
        tree.insert(root.clone());
        Self {
            id: 0,
            root,
            tree,
            origins: BTreeSet::new(),
            regions: BTreeSet::new(),
            triggered_errors: Vec::new(),
            triggered_fixes_from_downstream: BTreeSet::new(),
            effect: 0,
            changed: false,
        }
    }

    pub fn set_origins(&mut self, store: &ErrorStore) -> Result<(), CacheError> {
        self.origins = store.regions_resolved_by(&self.root)?;
        Ok(())
    }

    /// Recomputes `regions` from the current tree. Must run after every
    /// tree change.
    pub fn recollect_impacted_regions(&mut self, index: &dyn RegionRegistry) {
        let mut regions = index.impacted_regions_of_tree(&self.tree);
        regions.extend(self.origins.iter().cloned());
        self.regions = regions;
    }

    pub fn has_conflict_in_regions(&self, other: &Node) -> bool {
        !self.regions.is_disjoint(&other.regions)
    }

    /// Stores the measured frontier and sets `effect` to `local_effect` plus
    /// the inheritance correction against the rest of `batch`.
    pub fn update_status(
        &mut self,
        local_effect: i64,
        batch: &BTreeSet<Fix>,
        triggered_errors: Vec<ReportedError>,
        triggered_fixes_from_downstream: BTreeSet<Fix>,
        methods: &MethodRegistry,
    ) {
        self.triggered_errors = triggered_errors;
        self.triggered_fixes_from_downstream = triggered_fixes_from_downstream;
        self.effect = local_effect + self.inheritance_correction(batch, methods);
    }

    /// Counts overridden methods annotated only because another tree in the
    /// same batch annotated them. Their override errors were suppressed in
    /// this build and would otherwise be missing from this node's effect.
    /// Resolves one override level.
    fn inheritance_correction(&self, batch: &BTreeSet<Fix>, methods: &MethodRegistry) -> i64 {
        let mut correction = 0;
        for fix in &self.tree {
            let Location::Method { class, method } = &fix.location else {
                continue;
            };
            let Some(parent) = methods.closest_super_method(class, method) else {
                continue;
            };
            if parent.has_nullable_return {
                continue;
            }
            let parent_fix = Fix::new(parent.location(), fix.annotation.as_str());
            if !self.tree.contains(&parent_fix) && batch.contains(&parent_fix) {
                correction += 1;
            }
        }
        correction
    }

    /// Grows the tree with the resolving candidates of triggered errors and
    /// the downstream-driven candidates. Returns whether anything was added.
    pub fn merge_triggered(&mut self) -> bool {
        let before = self.tree.len();
        let incoming: Vec<Fix> = self
            .triggered_errors
            .iter()
            .flat_map(|e| e.resolving_fixes.iter())
            .chain(self.triggered_fixes_from_downstream.iter())
            .cloned()
            .collect();
        let mut tree: BTreeSet<Fix> = std::mem::take(&mut self.tree)
            .into_iter()
            .map(|fix| fix.in_target())
            .collect();
        tree.extend(incoming.into_iter().map(|fix| fix.in_target()));
        self.tree = tree;
        self.changed = self.tree.len() > before;
        self.changed
    }
}
