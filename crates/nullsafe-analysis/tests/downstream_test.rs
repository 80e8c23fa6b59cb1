//! Tests for the downstream impact cache and the analysis modes built on it.

mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use common::*;
use nullsafe_analysis::cache::downstream::DownstreamAnalysis;
use nullsafe_analysis::cache::{
    DownstreamImpactCache, DownstreamImpactCacheImpl, Impact, VoidDownstreamImpactCache,
};
use nullsafe_analysis::cache::downstream::{DownstreamImpact, PASSING_NULLABLE_ORIGIN};
use nullsafe_analysis::evaluator::{Report, Tag};
use nullsafe_analysis::facts::{MethodRegistry, ModuleInfo, UsageTable};
use nullsafe_analysis::model::{Fix, ReportedError};
use nullsafe_analysis::processor::ProcessorStrategy;
use nullsafe_analysis::AnalysisMode;
use nullsafe_core::errors::CacheError;
use nullsafe_core::events::EventDispatcher;
use proptest::prelude::*;

fn target() -> MethodRegistry {
    registry(&[("Api", "get()"), ("Api", "find()"), ("Api", "put(Object)")])
}

fn impact(fix: &Fix, errors: Vec<ReportedError>) -> DownstreamImpact {
    DownstreamImpact::new(
        Impact {
            fix: fix.clone(),
            triggered_errors: errors,
            triggered_fixes_on_downstream: BTreeSet::new(),
        },
        &target(),
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// EFFECTS AND BOUNDS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn candidates_outside_the_cache_count_as_zero() {
    let get = method_fix("Api", "get()");
    let cache = DownstreamImpactCacheImpl::from_impacts([impact(
        &get,
        vec![error("App", "run()", "deref", &[])],
    )])
    .unwrap();
    let other = method_fix("Api", "find()");
    assert_eq!(cache.effect_on_downstream(&other, &BTreeSet::from([other.clone()])), 0);
    assert_eq!(cache.effect_on_downstream(&get, &BTreeSet::from([get.clone()])), 1);
}

#[test]
fn tree_members_resolve_downstream_errors() {
    let get = method_fix("Api", "get()");
    let put = param_fix("Api", "put(Object)", 0);
    let cache = DownstreamImpactCacheImpl::from_impacts([impact(
        &get,
        vec![
            error("App", "run()", "passes get() to put", &[put.clone()]),
            error("App", "show()", "deref", &[]),
        ],
    )])
    .unwrap();

    assert_eq!(cache.effect_on_downstream(&get, &BTreeSet::from([get.clone()])), 2);
    let tree = BTreeSet::from([get.clone(), put.clone()]);
    assert_eq!(cache.effect_on_downstream(&get, &tree), 1);

    let triggered = cache.triggered_fixes_for_collection(&BTreeSet::from([get.clone()]), &target());
    assert_eq!(triggered, BTreeSet::from([put]));
}

#[test]
fn downstream_driven_candidates_are_flagged_outside_target() {
    let get = method_fix("Api", "get()");
    let put = param_fix("Api", "put(Object)", 0);
    let cache = DownstreamImpactCacheImpl::from_impacts([impact(
        &get,
        vec![
            error("App", "run()", "passes get() to put", &[put.clone()]),
            error("App", "log()", "deref", &[]),
        ],
    )])
    .unwrap();

    let fixes = cache.triggered_fixes_for_collection(&BTreeSet::from([get.clone()]), &target());
    assert_eq!(fixes, BTreeSet::from([put.clone()]));
    let fix = fixes.iter().next().unwrap();
    assert!(!fix.source_in_target);
    assert_eq!(fix.origin, PASSING_NULLABLE_ORIGIN);

    // Once the tree holds the parameter nothing is left to propose.
    assert!(cache
        .triggered_fixes_for_collection(&BTreeSet::from([get, put]), &target())
        .is_empty());
}

#[test]
fn bounds_take_max_and_sum() {
    let get = method_fix("Api", "get()");
    let find = method_fix("Api", "find()");
    let cache = DownstreamImpactCacheImpl::from_impacts([
        impact(&get, vec![error("App", "a()", "x", &[]), error("App", "b()", "y", &[])]),
        impact(&find, vec![error("App", "c()", "z", &[])]),
    ])
    .unwrap();
    let tree = BTreeSet::from([get, find]);
    assert_eq!(cache.lower_bound(&tree), 2);
    assert_eq!(cache.upper_bound(&tree), 3);
    assert_eq!(cache.lower_bound(&BTreeSet::new()), 0);
}

#[test]
fn duplicate_registration_is_fatal() {
    let get = method_fix("Api", "get()");
    let err = DownstreamImpactCacheImpl::from_impacts([
        impact(&get, Vec::new()),
        impact(&get, Vec::new()),
    ])
    .unwrap_err();
    assert!(matches!(err, CacheError::DuplicateImpact { .. }));
}

#[test]
fn injected_parameters_clear_their_errors() {
    let get = method_fix("Api", "get()");
    let put = param_fix("Api", "put(Object)", 0);
    let mut cache = DownstreamImpactCacheImpl::from_impacts([impact(
        &get,
        vec![error("App", "run()", "passes get() to put", &[put.clone()])],
    )])
    .unwrap();
    assert_eq!(
        cache.get(&get).unwrap().impacted_parameters.len(),
        1
    );

    cache.update_impacts_after_injection(&BTreeSet::from([put]));
    assert_eq!(cache.effect_on_downstream(&get, &BTreeSet::from([get.clone()])), 0);
    assert!(cache.get(&get).unwrap().impacted_parameters.is_empty());
}

#[test]
fn void_cache_is_inert() {
    let get = method_fix("Api", "get()");
    let tree = BTreeSet::from([get.clone()]);
    let void = VoidDownstreamImpactCache;
    assert!(!void.is_enabled());
    assert_eq!(void.upper_bound(&tree), 0);
    assert!(!void.triggers_unresolvable_errors_on_downstream(&get, &target()));
}

// ═══════════════════════════════════════════════════════════════════════════
// PRE-SCAN
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn analyze_measures_public_methods_used_downstream() {
    let get = method_fix("Api", "get()");
    let target_module = ModuleInfo::new("target", target());
    let mut method_usages = UsageTable::new();
    method_usages.push(usage("App", "run()", "Api", "get()"));
    let dependents = ModuleInfo {
        name: "downstream".to_string(),
        methods: Arc::clone(&target_module.methods),
        fields: target_module.fields.clone(),
        method_usages,
        field_usages: UsageTable::new(),
    };
    let project = SimProject::named(
        "downstream",
        vec![Rule::triggered_by(&get, error("App", "run()", "deref of get()", &[]))],
    );
    let mut checker = project.clone();
    let mut injector = project.clone();
    let events = EventDispatcher::new();

    let cache = DownstreamImpactCacheImpl::analyze(DownstreamAnalysis {
        target: &target_module,
        dependents: &dependents,
        checker: &mut checker,
        injector: &mut injector,
        strategy: ProcessorStrategy::Batched,
        annotation: ANNOTATION,
        events: &events,
    })
    .unwrap();

    // Only get() is called from a dependent module.
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.effect_on_downstream(&get, &BTreeSet::from([get.clone()])), 1);
    assert!(cache.triggers_unresolvable_errors_on_downstream(&get, &target()));
    assert!(project.annotated().is_empty());
    // Baseline plus one batch.
    assert_eq!(project.builds(), 2);
}

// ═══════════════════════════════════════════════════════════════════════════
// ANALYSIS MODES
// ═══════════════════════════════════════════════════════════════════════════

fn report(root: &Fix, local_effect: i64, lower: i64, upper: i64) -> Report {
    let mut report = Report::new(root.clone());
    report.local_effect = local_effect;
    report.lower_bound = lower;
    report.upper_bound = upper;
    report.processed = true;
    report
}

#[test]
fn modes_degrade_to_local_without_downstream() {
    assert_eq!(AnalysisMode::parse("strict", false), AnalysisMode::Local);
    assert_eq!(AnalysisMode::parse("default", true), AnalysisMode::LowerBound);
    assert_eq!(AnalysisMode::parse("upper_bound", true), AnalysisMode::UpperBound);
    assert_eq!(AnalysisMode::parse("local", true), AnalysisMode::Local);
}

#[test]
fn mode_names_ignore_case() {
    assert_eq!(AnalysisMode::parse("STRICT", true), AnalysisMode::Strict);
    assert_eq!(AnalysisMode::parse("Upper_Bound", true), AnalysisMode::UpperBound);
    assert_eq!(AnalysisMode::parse(" Local ", true), AnalysisMode::Local);
}

#[test]
fn bound_modes_add_the_downstream_effect() {
    let root = method_fix("Api", "find()");
    let void = VoidDownstreamImpactCache;
    let mut reports = vec![report(&root, -1, 0, 2)];

    AnalysisMode::LowerBound.tag(&void, &mut reports, &target());
    assert_eq!(reports[0].tag, Tag::Approve);
    AnalysisMode::UpperBound.tag(&void, &mut reports, &target());
    assert_eq!(reports[0].tag, Tag::Reject);
    AnalysisMode::Local.tag(&void, &mut reports, &target());
    assert!(reports[0].approved());
    assert_eq!(AnalysisMode::UpperBound.overall_effect(&reports[0]), 1);
}

#[test]
fn strict_rejects_unresolvable_downstream_errors() {
    let get = method_fix("Api", "get()");
    let find = method_fix("Api", "find()");
    let cache = DownstreamImpactCacheImpl::from_impacts([impact(
        &get,
        vec![error("App", "run()", "deref", &[])],
    )])
    .unwrap();
    let mut reports = vec![report(&get, -1, 0, 0), report(&find, -1, 0, 0), report(&find, 0, 0, 1)];

    AnalysisMode::Strict.tag(&cache, &mut reports, &target());
    assert_eq!(reports[0].tag, Tag::Reject);
    assert_eq!(reports[1].tag, Tag::Approve);
    assert_eq!(reports[2].tag, Tag::Reject);
}

// ═══════════════════════════════════════════════════════════════════════════
// PROPERTIES
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lower_bound_never_exceeds_upper_bound(
        counts in prop::collection::vec(0usize..5, 1..6),
        members in prop::collection::vec(any::<bool>(), 1..6),
    ) {
        let fixes: Vec<Fix> = (0..counts.len()).map(|i| method_fix("Api", &format!("m{i}()"))).collect();
        let impacts = fixes.iter().zip(&counts).map(|(fix, &n)| {
            let errors = (0..n).map(|k| error("App", &format!("r{k}()"), &fix.location.to_string(), &[])).collect();
            impact(fix, errors)
        });
        let cache = DownstreamImpactCacheImpl::from_impacts(impacts).unwrap();
        let tree: BTreeSet<Fix> = fixes
            .iter()
            .zip(members.iter().cycle())
            .filter(|(_, keep)| **keep)
            .map(|(fix, _)| fix.clone())
            .collect();

        let lower = cache.lower_bound(&tree);
        let upper = cache.upper_bound(&tree);
        prop_assert!(0 <= lower);
        prop_assert!(lower <= upper);
    }
}
