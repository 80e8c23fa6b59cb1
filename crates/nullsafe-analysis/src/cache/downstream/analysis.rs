//! Downstream impact pre-scan over the public API of the target module.

use std::collections::{BTreeMap, BTreeSet};

use nullsafe_core::errors::{AnnotatorError, CacheError};
use nullsafe_core::events::EventDispatcher;
use nullsafe_core::types::collections::FxHashMap;

use super::{DownstreamImpactCache, VoidDownstreamImpactCache};
use crate::build::{self, Checker};
use crate::cache::{ErrorStore, Impact};
use crate::evaluator::{BasicEvaluator, Evaluator};
use crate::facts::{MethodRegistry, ModuleInfo};
use crate::inject::AnnotationInjector;
use crate::model::{Fix, Location, ReportedError};
use crate::processor::{ProcessorContext, ProcessorStrategy};

/// Origin tag of pre-scan candidates.
pub const DOWNSTREAM_ORIGIN: &str = "DOWNSTREAM";

/// Downstream impact of one public method candidate.
#[derive(Debug, Clone)]
pub struct DownstreamImpact {
    pub impact: Impact,
    /// Target parameters that receive a nullable value from a dependent
    /// call site, with the errors each one would resolve.
    pub impacted_parameters: BTreeMap<Location, Vec<ReportedError>>,
}

impl DownstreamImpact {
    /// Splits out errors resolved by a single target-module parameter.
    pub fn new(impact: Impact, target: &MethodRegistry) -> Self {
        let mut impacted_parameters: BTreeMap<Location, Vec<ReportedError>> = BTreeMap::new();
        for error in &impact.triggered_errors {
            if let Some(location) = error.single_resolving_location() {
                if location.is_parameter() && target.declares(location) {
                    impacted_parameters
                        .entry(location.clone())
                        .or_default()
                        .push(error.clone());
                }
            }
        }
        Self {
            impact,
            impacted_parameters,
        }
    }

    fn update_after_injection(&mut self, injected: &BTreeSet<Fix>) {
        for fix in injected {
            if let Some(errors) = self.impacted_parameters.remove(&fix.location) {
                self.impact
                    .triggered_errors
                    .retain(|e| !errors.contains(e));
            }
        }
        self.impact.update_after_injection(injected);
    }
}

/// Collaborators of the pre-scan. The checker builds the dependent modules;
/// the injector should be virtual so dependents' sources are never edited.
pub struct DownstreamAnalysis<'a> {
    pub target: &'a ModuleInfo,
    /// Usages recorded in the dependent modules.
    pub dependents: &'a ModuleInfo,
    pub checker: &'a mut dyn Checker,
    pub injector: &'a mut dyn AnnotationInjector,
    pub strategy: ProcessorStrategy,
    pub annotation: &'a str,
    pub events: &'a EventDispatcher,
}

/// Read-only after `analyze`, except for post-injection cleanup.
#[derive(Debug, Default)]
pub struct DownstreamImpactCacheImpl {
    store: FxHashMap<Location, DownstreamImpact>,
}

impl DownstreamImpactCacheImpl {
    pub fn from_impacts(
        impacts: impl IntoIterator<Item = DownstreamImpact>,
    ) -> Result<Self, CacheError> {
        let mut cache = Self::default();
        for impact in impacts {
            cache.insert(impact)?;
        }
        Ok(cache)
    }

    fn insert(&mut self, impact: DownstreamImpact) -> Result<(), CacheError> {
        let location = impact.impact.fix.location.clone();
        if self.store.contains_key(&location) {
            return Err(CacheError::DuplicateImpact {
                location: location.to_string(),
            });
        }
        self.store.insert(location, impact);
        Ok(())
    }

    /// Measures every public, reference-returning target method that is
    /// called from a dependent module, one depth level deep.
    pub fn analyze(analysis: DownstreamAnalysis<'_>) -> Result<Self, AnnotatorError> {
        let DownstreamAnalysis {
            target,
            dependents,
            checker,
            injector,
            strategy,
            annotation,
            events,
        } = analysis;

        let candidates: BTreeSet<Fix> = target
            .methods
            .public_methods_with_non_primitive_return()
            .into_iter()
            .filter(|m| {
                !dependents
                    .method_usages
                    .regions_using(&m.class, &m.signature)
                    .is_empty()
            })
            .map(|m| {
                let fix = Fix::new(m.location(), annotation)
                    .with_origin(DOWNSTREAM_ORIGIN)
                    .with_source_in_target(false);
                match &m.path {
                    Some(path) => fix.with_path(path.clone()),
                    None => fix,
                }
            })
            .collect();
        tracing::info!(
            candidates = candidates.len(),
            module = %dependents.name,
            "analyzing downstream impact of public methods"
        );

        let mut error_store = ErrorStore::new();
        error_store.set_baseline(build::build_and_collect(checker, events, 0)?);

        let void = VoidDownstreamImpactCache;
        let mut ctx = ProcessorContext {
            module: dependents,
            target: &target.methods,
            checker,
            injector,
            error_store: &mut error_store,
            downstream: &void,
            events,
        };
        let mut evaluator = BasicEvaluator::new(1, false, strategy.processor());
        let reports = evaluator.evaluate(&mut ctx, &candidates)?;

        let mut cache = Self::default();
        for report in reports {
            let triggered_errors = report
                .triggered_errors
                .into_iter()
                .map(|e| with_target_paths(e, &target.methods))
                .collect();
            let impact = Impact {
                fix: report.root,
                triggered_errors,
                triggered_fixes_on_downstream: BTreeSet::new(),
            };
            cache.insert(DownstreamImpact::new(impact, &target.methods))?;
        }
        Ok(cache)
    }

    pub fn get(&self, fix: &Fix) -> Option<&DownstreamImpact> {
        self.store.get(&fix.location)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

/// Points resolving candidates at the target module's source files.
fn with_target_paths(mut error: ReportedError, target: &MethodRegistry) -> ReportedError {
    error.resolving_fixes = error
        .resolving_fixes
        .into_iter()
        .map(|fix| match target.path_of_class(fix.location.class()) {
            Some(path) => fix.with_path(path),
            None => fix,
        })
        .collect();
    error
}

impl DownstreamImpactCache for DownstreamImpactCacheImpl {
    fn is_enabled(&self) -> bool {
        true
    }

    fn effect_on_downstream(&self, fix: &Fix, tree: &BTreeSet<Fix>) -> i64 {
        let Some(downstream) = self.get(fix) else {
            return 0;
        };
        let errors = &downstream.impact.triggered_errors;
        let resolved = errors.iter().filter(|e| e.is_resolvable_with(tree)).count();
        (errors.len() - resolved) as i64
    }

    fn triggered_errors_for_collection(&self, fixes: &BTreeSet<Fix>) -> Vec<ReportedError> {
        let errors: BTreeSet<&ReportedError> = fixes
            .iter()
            .filter_map(|fix| self.get(fix))
            .flat_map(|d| d.impact.triggered_errors.iter())
            .filter(|e| !e.is_resolvable_with(fixes))
            .collect();
        errors.into_iter().cloned().collect()
    }

    fn triggers_unresolvable_errors_on_downstream(&self, fix: &Fix, target: &MethodRegistry) -> bool {
        self.get(fix).is_some_and(|d| {
            d.impact
                .triggered_errors
                .iter()
                .any(|e| !e.is_fixable_on_target(target))
        })
    }

    fn update_impacts_after_injection(&mut self, injected: &BTreeSet<Fix>) {
        for downstream in self.store.values_mut() {
            downstream.update_after_injection(injected);
        }
    }
}
