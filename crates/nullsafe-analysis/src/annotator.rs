//! Outer loop: build, evaluate, tag, inject, repeat until no new roots.

use std::collections::BTreeSet;
use std::sync::Arc;

use nullsafe_core::config::NullsafeConfig;
use nullsafe_core::errors::{AnnotatorError, ConfigError, NullsafeErrorCode};
use nullsafe_core::events::types::{ErrorEvent, FixesInjectedEvent, IterationCompletedEvent};
use nullsafe_core::events::{AnnotatorEventHandler, EventDispatcher};
use nullsafe_core::tracing::metrics;

use crate::analysis_mode::AnalysisMode;
use crate::build::{self, Checker, CommandChecker};
use crate::cache::downstream::DownstreamAnalysis;
use crate::cache::{
    DownstreamImpactCache, DownstreamImpactCacheImpl, ErrorStore, ImpactCache,
    VoidDownstreamImpactCache,
};
use crate::evaluator::{BasicEvaluator, CachedEvaluator, Evaluator, Report};
use crate::facts::ModuleInfo;
use crate::inject::{AnnotationInjector, CommandInjector, VirtualInjector};
use crate::model::Fix;
use crate::output;
use crate::processor::{ProcessorContext, ProcessorStrategy};
use crate::report_cache::ReportCache;
use crate::run_log::{RunLog, RunSummary};

/// Dependent modules measured by the downstream pre-scan.
pub struct DownstreamSetup {
    /// Usages recorded in the dependents, sharing the target's declarations.
    pub module: ModuleInfo,
    pub checker: Box<dyn Checker>,
    pub injector: Box<dyn AnnotationInjector>,
}

/// Result of a full run.
#[derive(Debug, Clone)]
pub struct AnnotationOutcome {
    /// Latest report of every root ever evaluated, in root order.
    pub reports: Vec<Report>,
    pub mode: AnalysisMode,
    pub iterations: u32,
    /// Every annotation applied to the target module.
    pub injected: BTreeSet<Fix>,
    pub summary: RunSummary,
}

/// Mutable state threaded through the iterations of one run.
struct RunState {
    strategy: ProcessorStrategy,
    mode: AnalysisMode,
    downstream: Box<dyn DownstreamImpactCache>,
    report_cache: ReportCache,
    impact_cache: ImpactCache,
    injected: BTreeSet<Fix>,
    iterations: u32,
}

pub struct Annotator {
    config: NullsafeConfig,
    target: ModuleInfo,
    checker: Box<dyn Checker>,
    injector: Box<dyn AnnotationInjector>,
    downstream: Option<DownstreamSetup>,
    events: EventDispatcher,
    run_log: Arc<RunLog>,
}

impl Annotator {
    /// Wires command-backed collaborators from a validated configuration.
    pub fn from_config(config: NullsafeConfig) -> Result<Self, AnnotatorError> {
        NullsafeConfig::validate(&config)?;
        let annotation = config.annotator.effective_nullable_annotation().to_string();
        let redirect = config.annotator.effective_redirect_build_output();

        let build_command = required(config.target.build_command.as_deref(), "target.build_command")?;
        let edit_command = required(config.target.edit_command.as_deref(), "target.edit_command")?;
        let work_dir = config
            .target
            .effective_work_dir()
            .ok_or_else(|| missing("target.work_dir"))?;

        let name = config.target.effective_name().to_string();
        let target = ModuleInfo::load(name.clone(), &config.target.fact_dirs)?;
        let checker = CommandChecker::new(
            name,
            build_command,
            config.target.fact_dirs.clone(),
            annotation.clone(),
        )
        .with_fields(target.fields.clone())
        .with_redirect_output(redirect);
        let injector = CommandInjector::new(edit_command, work_dir).with_redirect_output(redirect);

        let downstream = if config.downstream.effective_enabled() {
            let settings = &config.downstream;
            let command = required(settings.build_command.as_deref(), "downstream.build_command")?;
            let model_dir = settings
                .library_model_dir
                .clone()
                .ok_or_else(|| missing("downstream.library_model_dir"))?;
            let module = ModuleInfo::load_dependents("downstream", &settings.fact_dirs, &target)?;
            let checker = CommandChecker::new(
                "downstream",
                command,
                settings.fact_dirs.clone(),
                annotation,
            )
            .with_fields(target.fields.clone())
            .with_redirect_output(redirect);
            Some(DownstreamSetup {
                module,
                checker: Box::new(checker),
                injector: Box::new(VirtualInjector::new(model_dir)),
            })
        } else {
            None
        };

        let mut annotator =
            Self::with_collaborators(config, target, Box::new(checker), Box::new(injector));
        annotator.downstream = downstream;
        Ok(annotator)
    }

    /// An annotator over caller-supplied collaborators, without downstream
    /// analysis.
    pub fn with_collaborators(
        config: NullsafeConfig,
        target: ModuleInfo,
        checker: Box<dyn Checker>,
        injector: Box<dyn AnnotationInjector>,
    ) -> Self {
        let run_log = Arc::new(RunLog::new());
        let mut events = EventDispatcher::new();
        events.register(Arc::clone(&run_log) as Arc<dyn AnnotatorEventHandler>);
        Self {
            config,
            target,
            checker,
            injector,
            downstream: None,
            events,
            run_log,
        }
    }

    pub fn with_downstream(mut self, downstream: DownstreamSetup) -> Self {
        self.downstream = Some(downstream);
        self
    }

    pub fn register_handler(&mut self, handler: Arc<dyn AnnotatorEventHandler>) {
        self.events.register(handler);
    }

    pub fn run(&mut self) -> Result<AnnotationOutcome, AnnotatorError> {
        self.execute().inspect_err(|err| {
            tracing::error!(error = %err.coded_string(), "annotation run failed");
            self.events.emit_error(&ErrorEvent {
                message: err.to_string(),
                error_code: err.error_code().to_string(),
            });
        })
    }

    fn execute(&mut self) -> Result<AnnotationOutcome, AnnotatorError> {
        let annotator = &self.config.annotator;
        let strategy = ProcessorStrategy::parse(annotator.effective_strategy()).ok_or_else(|| {
            ConfigError::InvalidValue {
                field: "annotator.strategy".to_string(),
                message: format!("unknown strategy '{}'", annotator.effective_strategy()),
            }
        })?;
        let outer_loop = annotator.effective_outer_loop();
        let use_cache = annotator.effective_use_cache();

        let downstream: Box<dyn DownstreamImpactCache> = match self.downstream.as_mut() {
            Some(setup) => Box::new(DownstreamImpactCacheImpl::analyze(DownstreamAnalysis {
                target: &self.target,
                dependents: &setup.module,
                checker: setup.checker.as_mut(),
                injector: setup.injector.as_mut(),
                strategy,
                annotation: self.config.annotator.effective_nullable_annotation(),
                events: &self.events,
            })?),
            None => Box::new(VoidDownstreamImpactCache),
        };
        let mode = AnalysisMode::parse(self.config.annotator.effective_mode(), downstream.is_enabled());
        tracing::info!(?mode, strategy = strategy.processor().name(), "starting annotation run");

        let mut state = RunState {
            strategy,
            mode,
            downstream,
            report_cache: ReportCache::new(use_cache),
            impact_cache: ImpactCache::new(),
            injected: BTreeSet::new(),
            iterations: 0,
        };

        while state.report_cache.is_updated() {
            self.iterate(&mut state)?;
            if !outer_loop {
                break;
            }
        }
        if outer_loop {
            state.report_cache.disable();
            self.iterate(&mut state)?;
            state.report_cache.enable();
        }

        let reports: Vec<Report> = state.report_cache.reports().cloned().collect();
        let summary = self.run_log.summary();
        if let Some(dir) = &self.config.output.dir {
            let chain = self.config.annotator.effective_chain();
            output::write_reports(dir, &output::report_entries(&reports, mode, chain))?;
            output::write_log(dir, &summary)?;
        }
        tracing::info!(
            iterations = state.iterations,
            reports = reports.len(),
            injected = state.injected.len(),
            builds = summary.builds,
            "annotation run finished"
        );
        Ok(AnnotationOutcome {
            reports,
            mode,
            iterations: state.iterations,
            injected: state.injected,
            summary,
        })
    }

    /// One outer-loop iteration. Evaluates every unprocessed candidate that
    /// resolves a current target error and injects the approved ones.
    fn iterate(&mut self, state: &mut RunState) -> Result<(), AnnotatorError> {
        state.iterations += 1;
        let iteration = state.iterations;
        let settings = &self.config.annotator;
        let (depth, bailout, chain) = (
            settings.effective_depth(),
            settings.effective_bailout(),
            settings.effective_chain(),
        );

        let errors = build::build_and_collect(self.checker.as_mut(), &self.events, 0)?;
        let candidates: BTreeSet<Fix> = errors
            .iter()
            .flat_map(|e| e.resolving_fixes.iter())
            .filter(|fix| self.target.methods.declares(&fix.location))
            .filter(|fix| !state.report_cache.processed(fix))
            .cloned()
            .collect();
        tracing::info!(
            { metrics::ITERATION } = iteration,
            errors = errors.len(),
            candidates = candidates.len(),
            "collected candidates"
        );

        let mut error_store = ErrorStore::new();
        error_store.set_baseline(errors);

        let mut reports = {
            let mut ctx = ProcessorContext {
                module: &self.target,
                target: &self.target.methods,
                checker: self.checker.as_mut(),
                injector: self.injector.as_mut(),
                error_store: &mut error_store,
                downstream: &*state.downstream,
                events: &self.events,
            };
            let processor = state.strategy.processor();
            let mut evaluator: Box<dyn Evaluator + '_> = if settings.effective_use_impact_cache() {
                Box::new(CachedEvaluator::new(depth, bailout, processor, &mut state.impact_cache))
            } else {
                Box::new(BasicEvaluator::new(depth, bailout, processor))
            };
            evaluator.evaluate(&mut ctx, &candidates)?
        };

        if state.downstream.is_enabled() {
            for report in &mut reports {
                report.compute_bounds(&*state.downstream);
            }
        }
        state
            .mode
            .tag(&*state.downstream, &mut reports, &self.target.methods);
        state.report_cache.update(&reports);

        let selected: BTreeSet<Fix> = reports
            .iter()
            .filter(|r| r.approved())
            .flat_map(|r| {
                if chain {
                    r.tree.iter().cloned().collect::<Vec<_>>()
                } else {
                    vec![r.root.clone()]
                }
            })
            .filter(|fix| self.target.methods.declares(&fix.location))
            .filter(|fix| !state.injected.contains(fix))
            .collect();

        self.injector.inject(&selected)?;
        self.events.emit_fixes_injected(&FixesInjectedEvent {
            module: self.target.name.clone(),
            count: selected.len(),
        });
        state.impact_cache.update_impacts_after_injection(&selected);
        state.downstream.update_impacts_after_injection(&selected);

        let approved = reports.iter().filter(|r| r.approved()).count();
        self.events.emit_iteration_completed(&IterationCompletedEvent {
            iteration,
            reports: reports.len(),
            approved,
        });
        tracing::info!(
            { metrics::ITERATION } = iteration,
            reports = reports.len(),
            approved,
            injected = selected.len(),
            "iteration completed"
        );
        state.injected.extend(selected);
        Ok(())
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| missing(field))
}

fn missing(field: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: "required to run the annotator".to_string(),
    }
}
