//! Measured impact of a single candidate.

use std::collections::BTreeSet;

use crate::model::{Fix, ReportedError};

/// Errors a candidate triggers on its own, and the downstream-driven
/// candidates it pulls into the target module.
#[derive(Debug, Clone)]
pub struct Impact {
    pub fix: Fix,
    pub triggered_errors: Vec<ReportedError>,
    pub triggered_fixes_on_downstream: BTreeSet<Fix>,
}

impl Impact {
    pub fn new(fix: Fix) -> Self {
        Self {
            fix,
            triggered_errors: Vec::new(),
            triggered_fixes_on_downstream: BTreeSet::new(),
        }
    }

    /// Drops errors and follow-up candidates that `injected` already covers.
    pub fn update_after_injection(&mut self, injected: &BTreeSet<Fix>) {
        self.triggered_errors.retain(|e| !e.is_resolvable_with(injected));
        self.triggered_fixes_on_downstream
            .retain(|fix| !injected.contains(fix));
    }
}
