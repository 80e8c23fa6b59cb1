//! Baseline/current snapshots of reported errors and their diffs.

use std::collections::BTreeSet;
use std::time::SystemTime;

use nullsafe_core::errors::CacheError;
use nullsafe_core::types::collections::FxHashMap;

use crate::model::{Fix, Region, ReportedError};

/// Reported errors of one build.
#[derive(Debug, Clone)]
pub struct ErrorSnapshot {
    pub errors: Vec<ReportedError>,
    /// Monotonic build counter within the store.
    pub generation: u64,
    pub taken_at: SystemTime,
}

/// Result of comparing the current snapshot against the baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorDiff {
    /// `|current| - |baseline|` over the compared scope. Negative is better.
    pub delta: i64,
    /// Errors present in current but not in baseline (multiset difference).
    pub new_errors: Vec<ReportedError>,
}

impl ErrorDiff {
    /// Accumulates another disjoint diff into this one.
    pub fn absorb(&mut self, other: ErrorDiff) {
        self.delta += other.delta;
        self.new_errors.extend(other.new_errors);
    }
}

#[derive(Debug, Default)]
pub struct ErrorStore {
    baseline: Option<ErrorSnapshot>,
    current: Option<ErrorSnapshot>,
    generation: u64,
}

impl ErrorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the state every measurement is compared against.
    pub fn set_baseline(&mut self, errors: Vec<ReportedError>) {
        self.baseline = Some(self.snapshot(errors));
        self.current = None;
    }

    /// Records the state after a batch was applied and rebuilt.
    pub fn save_current(&mut self, errors: Vec<ReportedError>) {
        self.current = Some(self.snapshot(errors));
    }

    fn snapshot(&mut self, errors: Vec<ReportedError>) -> ErrorSnapshot {
        self.generation += 1;
        ErrorSnapshot {
            errors,
            generation: self.generation,
            taken_at: SystemTime::now(),
        }
    }

    pub fn baseline(&self) -> Result<&ErrorSnapshot, CacheError> {
        self.baseline
            .as_ref()
            .ok_or(CacheError::MissingSnapshot { snapshot: "baseline" })
    }

    pub fn current(&self) -> Result<&ErrorSnapshot, CacheError> {
        self.current
            .as_ref()
            .ok_or(CacheError::MissingSnapshot { snapshot: "current" })
    }

    /// Whole-project diff.
    pub fn compare(&self) -> Result<ErrorDiff, CacheError> {
        self.compare_where(|_| true)
    }

    /// Diff restricted to errors reported in `region`.
    pub fn compare_by_region(&self, region: &Region) -> Result<ErrorDiff, CacheError> {
        self.compare_where(|e| &e.region == region)
    }

    /// Sum of `compare_by_region` over `regions`.
    pub fn compare_by_regions(&self, regions: &BTreeSet<Region>) -> Result<ErrorDiff, CacheError> {
        let mut diff = ErrorDiff::default();
        for region in regions {
            diff.absorb(self.compare_by_region(region)?);
        }
        Ok(diff)
    }

    fn compare_where<F>(&self, keep: F) -> Result<ErrorDiff, CacheError>
    where
        F: Fn(&ReportedError) -> bool,
    {
        let baseline = self.baseline()?;
        let current = self.current()?;

        let mut remaining: FxHashMap<&ReportedError, usize> = FxHashMap::default();
        let mut baseline_count = 0i64;
        for error in baseline.errors.iter().filter(|&e| keep(e)) {
            *remaining.entry(error).or_insert(0) += 1;
            baseline_count += 1;
        }

        let mut current_count = 0i64;
        let mut new_errors = Vec::new();
        for error in current.errors.iter().filter(|&e| keep(e)) {
            current_count += 1;
            match remaining.get_mut(error) {
                Some(count) if *count > 0 => *count -= 1,
                _ => new_errors.push(error.clone()),
            }
        }

        Ok(ErrorDiff {
            delta: current_count - baseline_count,
            new_errors,
        })
    }

    /// Regions of baseline errors that `fix` helps resolve.
    pub fn regions_resolved_by(&self, fix: &Fix) -> Result<BTreeSet<Region>, CacheError> {
        Ok(self
            .baseline()?
            .errors
            .iter()
            .filter(|e| e.resolving_fixes.contains(fix))
            .map(|e| e.region.clone())
            .collect())
    }

    /// Number of baseline errors fully resolved by `fixes`.
    pub fn resolved_by(&self, fixes: &BTreeSet<Fix>) -> Result<usize, CacheError> {
        Ok(self
            .baseline()?
            .errors
            .iter()
            .filter(|e| e.is_resolvable_with(fixes))
            .count())
    }
}
