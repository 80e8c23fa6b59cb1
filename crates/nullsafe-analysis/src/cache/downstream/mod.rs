//! Downstream impact cache: errors a target-module candidate would cause in
//! dependent modules, measured once per run.

pub mod analysis;
pub mod void;

use std::collections::BTreeSet;

use crate::facts::MethodRegistry;
use crate::model::{Fix, ReportedError};

pub use analysis::{DownstreamAnalysis, DownstreamImpact, DownstreamImpactCacheImpl};
pub use void::VoidDownstreamImpactCache;

/// Origin tag of target candidates proposed because a dependent module
/// passes them a nullable value.
pub const PASSING_NULLABLE_ORIGIN: &str = "PASSING_NULLABLE";

pub trait DownstreamImpactCache {
    fn is_enabled(&self) -> bool;

    /// `|triggered(fix)| - |triggered(fix) resolvable by tree|`.
    /// Candidates outside the pre-scanned surface count as 0.
    fn effect_on_downstream(&self, fix: &Fix, tree: &BTreeSet<Fix>) -> i64;

    /// Maximum per-candidate downstream effect over `tree`.
    fn lower_bound(&self, tree: &BTreeSet<Fix>) -> i64 {
        tree.iter()
            .map(|fix| self.effect_on_downstream(fix, tree))
            .max()
            .unwrap_or(0)
    }

    /// Sum of per-candidate downstream effects over `tree`.
    fn upper_bound(&self, tree: &BTreeSet<Fix>) -> i64 {
        tree.iter()
            .map(|fix| self.effect_on_downstream(fix, tree))
            .sum()
    }

    /// Downstream errors triggered by members of `fixes` and not resolved
    /// by the collection.
    fn triggered_errors_for_collection(&self, fixes: &BTreeSet<Fix>) -> Vec<ReportedError>;

    /// Target-module candidates that would neutralize the downstream errors
    /// triggered by `fixes`. They are flagged as outside the target so the
    /// owning tree keeps growing until it absorbs them.
    fn triggered_fixes_for_collection(
        &self,
        fixes: &BTreeSet<Fix>,
        target: &MethodRegistry,
    ) -> BTreeSet<Fix> {
        self.triggered_errors_for_collection(fixes)
            .into_iter()
            .filter(|e| e.is_fixable_on_target(target))
            .flat_map(|e| e.resolving_fixes.into_iter())
            .filter(|fix| !fixes.contains(fix))
            .map(|fix| {
                fix.with_source_in_target(false)
                    .with_origin(PASSING_NULLABLE_ORIGIN)
            })
            .collect()
    }

    /// True if `fix` causes a downstream error no target edit can resolve.
    fn triggers_unresolvable_errors_on_downstream(&self, fix: &Fix, target: &MethodRegistry) -> bool;

    /// Forgets errors resolved by annotations that were applied for good.
    fn update_impacts_after_injection(&mut self, injected: &BTreeSet<Fix>);
}
