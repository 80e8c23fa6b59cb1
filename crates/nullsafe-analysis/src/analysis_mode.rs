//! Acceptance policies for evaluated reports.

use crate::cache::DownstreamImpactCache;
use crate::evaluator::{Report, Tag};
use crate::facts::MethodRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// Target module effect only.
    Local,
    /// Local effect plus the optimistic downstream bound.
    LowerBound,
    /// Local effect plus the conservative downstream bound.
    UpperBound,
    /// Never introduce a downstream error.
    Strict,
}

impl AnalysisMode {
    /// Without downstream analysis every mode degrades to `Local`. Names are
    /// case-insensitive.
    pub fn parse(name: &str, downstream_enabled: bool) -> Self {
        if !downstream_enabled {
            return Self::Local;
        }
        match name.trim().to_ascii_lowercase().as_str() {
            "local" => Self::Local,
            "upper_bound" => Self::UpperBound,
            "strict" => Self::Strict,
            _ => Self::LowerBound,
        }
    }

    pub fn overall_effect(self, report: &Report) -> i64 {
        match self {
            Self::Local => report.local_effect,
            Self::UpperBound => report.local_effect + report.upper_bound,
            Self::LowerBound | Self::Strict => report.local_effect + report.lower_bound,
        }
    }

    /// Sets the tag of every report.
    pub fn tag(self, downstream: &dyn DownstreamImpactCache, reports: &mut [Report], target: &MethodRegistry) {
        for report in reports {
            let approve = match self {
                Self::Local => report.local_effect < 1,
                Self::LowerBound | Self::UpperBound => self.overall_effect(report) < 1,
                Self::Strict => {
                    let destructive = report
                        .tree
                        .iter()
                        .any(|fix| downstream.triggers_unresolvable_errors_on_downstream(fix, target));
                    !destructive && report.upper_bound == 0 && report.local_effect < 1
                }
            };
            report.tag = if approve { Tag::Approve } else { Tag::Reject };
        }
    }
}
