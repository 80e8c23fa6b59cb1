//! Evaluator that measures each candidate once and composes trees from
//! the impact cache.

use std::collections::BTreeSet;

use nullsafe_core::errors::AnnotatorError;
use nullsafe_core::events::types::DepthCompletedEvent;
use nullsafe_core::tracing::metrics;

use super::{Evaluator, Report};
use crate::cache::{Impact, ImpactCache};
use crate::graph::ConflictGraph;
use crate::model::Fix;
use crate::processor::{ConflictGraphProcessor, ProcessorContext};

/// Only candidates missing from the cache become nodes. A tree's effect is
/// `|triggered errors not resolved by the tree| - |baseline errors resolved
/// by the tree|`.
pub struct CachedEvaluator<'c> {
    depth: u32,
    bailout: bool,
    processor: Box<dyn ConflictGraphProcessor>,
    cache: &'c mut ImpactCache,
}

impl<'c> CachedEvaluator<'c> {
    pub fn new(
        depth: u32,
        bailout: bool,
        processor: Box<dyn ConflictGraphProcessor>,
        cache: &'c mut ImpactCache,
    ) -> Self {
        Self {
            depth,
            bailout,
            processor,
            cache,
        }
    }
}

impl Evaluator for CachedEvaluator<'_> {
    fn evaluate(
        &mut self,
        ctx: &mut ProcessorContext<'_>,
        fixes: &BTreeSet<Fix>,
    ) -> Result<Vec<Report>, AnnotatorError> {
        let mut reports: Vec<Report> = fixes.iter().cloned().map(Report::new).collect();

        for depth in 0..self.depth {
            let mut graph = ConflictGraph::new();
            let mut growing = Vec::new();
            for (idx, report) in reports.iter_mut().enumerate() {
                if !report.requires_further_process(self.bailout) {
                    continue;
                }
                let next = report.next_candidates();
                if next.is_empty() {
                    report.finished = true;
                    continue;
                }
                for fix in next.iter().filter(|fix| self.cache.is_unknown(fix)) {
                    graph.add_node(fix.clone());
                }
                growing.push((idx, next));
            }
            if growing.is_empty() {
                break;
            }

            let mut builds = 0;
            if !graph.is_empty() {
                graph.refresh_regions(ctx.error_store, ctx.module)?;
                let result = self.processor.process(ctx, &graph)?;
                builds = result.builds;
                graph.apply(&result, ctx.target)?;
                for node in graph.nodes() {
                    self.cache.register(Impact {
                        fix: node.root.clone(),
                        triggered_errors: node.triggered_errors.clone(),
                        triggered_fixes_on_downstream: node.triggered_fixes_from_downstream.clone(),
                    })?;
                }
            }

            for (idx, next) in growing {
                let report = &mut reports[idx];
                report.tree.extend(next);
                report.triggered_errors = self.cache.triggered_errors_for_collection(&report.tree);
                report.triggered_fixes_from_downstream = self
                    .cache
                    .triggered_fixes_on_downstream_for_collection(&report.tree);
                let resolved = ctx.error_store.resolved_by(&report.tree)? as i64;
                report.local_effect = report.triggered_errors.len() as i64 - resolved;
                report.processed = true;
            }

            ctx.events.emit_depth_completed(&DepthCompletedEvent {
                depth: depth + 1,
                nodes: graph.len(),
                finished_reports: reports.iter().filter(|r| r.finished).count(),
            });
            tracing::info!(
                { metrics::DEPTH } = depth + 1,
                nodes = graph.len(),
                builds,
                cached = self.cache.len(),
                "depth level completed"
            );
        }
        Ok(reports)
    }
}
