//! Evaluator that measures whole trees at every depth level.

use std::collections::BTreeSet;

use nullsafe_core::errors::AnnotatorError;
use nullsafe_core::events::types::DepthCompletedEvent;
use nullsafe_core::tracing::metrics;

use super::{Evaluator, Report};
use crate::graph::ConflictGraph;
use crate::model::Fix;
use crate::processor::{ConflictGraphProcessor, ProcessorContext};

/// Each level rebuilds every growing tree as a whole. A tree stops when
/// merging its frontier adds nothing, or at the depth bound.
pub struct BasicEvaluator {
    depth: u32,
    bailout: bool,
    processor: Box<dyn ConflictGraphProcessor>,
}

impl BasicEvaluator {
    pub fn new(depth: u32, bailout: bool, processor: Box<dyn ConflictGraphProcessor>) -> Self {
        Self {
            depth,
            bailout,
            processor,
        }
    }
}

impl Evaluator for BasicEvaluator {
    fn evaluate(
        &mut self,
        ctx: &mut ProcessorContext<'_>,
        fixes: &BTreeSet<Fix>,
    ) -> Result<Vec<Report>, AnnotatorError> {
        let mut reports: Vec<Report> = fixes.iter().cloned().map(Report::new).collect();

        for depth in 0..self.depth {
            let mut graph = ConflictGraph::new();
            let mut members = Vec::new();
            for (idx, report) in reports.iter_mut().enumerate() {
                if !report.requires_further_process(self.bailout) {
                    continue;
                }
                let mut node = report.to_node();
                if report.processed && !node.merge_triggered() {
                    report.finished = true;
                    continue;
                }
                members.push((idx, graph.insert(node)));
            }
            if graph.is_empty() {
                break;
            }

            graph.refresh_regions(ctx.error_store, ctx.module)?;
            let result = self.processor.process(ctx, &graph)?;
            graph.apply(&result, ctx.target)?;
            for (idx, id) in members {
                if let Some(node) = graph.get(id) {
                    reports[idx].absorb(node);
                }
            }

            ctx.events.emit_depth_completed(&DepthCompletedEvent {
                depth: depth + 1,
                nodes: graph.len(),
                finished_reports: reports.iter().filter(|r| r.finished).count(),
            });
            tracing::info!(
                { metrics::DEPTH } = depth + 1,
                nodes = graph.len(),
                builds = result.builds,
                "depth level completed"
            );
        }
        Ok(reports)
    }
}
