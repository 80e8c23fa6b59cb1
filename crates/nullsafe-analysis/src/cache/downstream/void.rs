//! Downstream cache used when no dependent modules are analyzed.

use std::collections::BTreeSet;

use super::DownstreamImpactCache;
use crate::facts::MethodRegistry;
use crate::model::{Fix, ReportedError};

#[derive(Debug, Default, Clone, Copy)]
pub struct VoidDownstreamImpactCache;

impl DownstreamImpactCache for VoidDownstreamImpactCache {
    fn is_enabled(&self) -> bool {
        false
    }

    fn effect_on_downstream(&self, _fix: &Fix, _tree: &BTreeSet<Fix>) -> i64 {
        0
    }

    fn triggered_errors_for_collection(&self, _fixes: &BTreeSet<Fix>) -> Vec<ReportedError> {
        Vec::new()
    }

    fn triggers_unresolvable_errors_on_downstream(&self, _fix: &Fix, _target: &MethodRegistry) -> bool {
        false
    }

    fn update_impacts_after_injection(&mut self, _injected: &BTreeSet<Fix>) {}
}
