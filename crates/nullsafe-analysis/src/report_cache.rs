//! Reports kept across outer-loop iterations.

use std::collections::BTreeMap;

use crate::evaluator::Report;
use crate::model::{Fix, Location};

/// Latest report per root location.
#[derive(Debug)]
pub struct ReportCache {
    store: BTreeMap<Location, Report>,
    enabled: bool,
    updated: bool,
}

impl ReportCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            store: BTreeMap::new(),
            enabled,
            updated: true,
        }
    }

    /// Whether `fix` was already evaluated as a root. Always false while
    /// disabled.
    pub fn processed(&self, fix: &Fix) -> bool {
        self.enabled && self.store.contains_key(&fix.location)
    }

    /// Stores `reports`; the cache counts as updated when a new root appeared.
    pub fn update(&mut self, reports: &[Report]) {
        let before = self.store.len();
        for report in reports {
            self.store.insert(report.root.location.clone(), report.clone());
        }
        self.updated = self.store.len() != before;
    }

    pub fn is_updated(&self) -> bool {
        self.updated
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn reports(&self) -> impl Iterator<Item = &Report> {
        self.store.values()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
