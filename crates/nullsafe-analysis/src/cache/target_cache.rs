//! Per-run impact cache for candidates in the module under mutation.

use std::collections::BTreeSet;

use nullsafe_core::errors::CacheError;
use nullsafe_core::types::collections::FxHashMap;

use super::Impact;
use crate::model::{Fix, Location, ReportedError};

/// Impacts keyed by candidate location. Populated lazily by the cached
/// evaluator; each location is registered at most once.
#[derive(Debug, Default)]
pub struct ImpactCache {
    store: FxHashMap<Location, Impact>,
}

impl ImpactCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering a location twice is a logic error.
    pub fn register(&mut self, impact: Impact) -> Result<(), CacheError> {
        if self.store.contains_key(&impact.fix.location) {
            return Err(CacheError::DuplicateImpact {
                location: impact.fix.location.to_string(),
            });
        }
        self.store.insert(impact.fix.location.clone(), impact);
        Ok(())
    }

    pub fn fetch(&self, fix: &Fix) -> Option<&Impact> {
        self.store.get(&fix.location)
    }

    pub fn is_unknown(&self, fix: &Fix) -> bool {
        !self.store.contains_key(&fix.location)
    }

    /// Errors triggered by members of `fixes` that the collection itself
    /// does not resolve, deduplicated.
    pub fn triggered_errors_for_collection(&self, fixes: &BTreeSet<Fix>) -> Vec<ReportedError> {
        let errors: BTreeSet<&ReportedError> = fixes
            .iter()
            .filter_map(|fix| self.fetch(fix))
            .flat_map(|impact| impact.triggered_errors.iter())
            .filter(|e| !e.is_resolvable_with(fixes))
            .collect();
        errors.into_iter().cloned().collect()
    }

    /// Downstream-driven candidates of members of `fixes` not already in it.
    pub fn triggered_fixes_on_downstream_for_collection(
        &self,
        fixes: &BTreeSet<Fix>,
    ) -> BTreeSet<Fix> {
        fixes
            .iter()
            .filter_map(|fix| self.fetch(fix))
            .flat_map(|impact| impact.triggered_fixes_on_downstream.iter())
            .filter(|fix| !fixes.contains(*fix))
            .cloned()
            .collect()
    }

    pub fn update_impacts_after_injection(&mut self, injected: &BTreeSet<Fix>) {
        for impact in self.store.values_mut() {
            impact.update_after_injection(injected);
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
