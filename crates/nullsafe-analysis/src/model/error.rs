//! Errors reported by the checker.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{Fix, Location, Region};
use crate::facts::MethodRegistry;

/// One reported error and the candidates that would make it disappear.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReportedError {
    pub kind: String,
    pub message: String,
    pub region: Region,
    pub offset: u64,
    pub path: Option<PathBuf>,
    /// Empty when no annotation can resolve the error.
    pub resolving_fixes: BTreeSet<Fix>,
}

impl ReportedError {
    /// True if every resolving candidate is in `fixes`.
    pub fn is_resolvable_with(&self, fixes: &BTreeSet<Fix>) -> bool {
        !self.resolving_fixes.is_empty() && self.resolving_fixes.is_subset(fixes)
    }

    pub fn is_single_fix(&self) -> bool {
        self.resolving_fixes.len() == 1
    }

    /// Location of the only resolving candidate.
    pub fn single_resolving_location(&self) -> Option<&Location> {
        if self.is_single_fix() {
            self.resolving_fixes.iter().next().map(|fix| &fix.location)
        } else {
            None
        }
    }

    /// True if every resolving candidate targets a location declared in the
    /// module described by `target`.
    pub fn is_fixable_on_target(&self, target: &MethodRegistry) -> bool {
        !self.resolving_fixes.is_empty()
            && self
                .resolving_fixes
                .iter()
                .all(|fix| target.declares(&fix.location))
    }
}
