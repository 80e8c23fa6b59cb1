//! One build per coloring group.

use std::collections::BTreeSet;

use nullsafe_core::errors::AnnotatorError;
use nullsafe_core::events::types::GroupsScheduledEvent;
use nullsafe_core::tracing::metrics;

use super::{BatchResult, ConflictGraphProcessor, ProcessorContext};
use crate::cache::ErrorDiff;
use crate::graph::ConflictGraph;
use crate::model::Fix;

/// Builds each group of region-disjoint nodes once and attributes the diff
/// to nodes by restricting it to each node's own regions.
#[derive(Debug, Default, Clone, Copy)]
pub struct BatchedProcessor;

impl ConflictGraphProcessor for BatchedProcessor {
    fn name(&self) -> &'static str {
        "batched"
    }

    fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        graph: &ConflictGraph,
    ) -> Result<BatchResult, AnnotatorError> {
        let groups = graph.find_groups();
        ctx.events.emit_groups_scheduled(&GroupsScheduledEvent {
            strategy: self.name(),
            groups: groups.len(),
            nodes: graph.len(),
        });
        tracing::info!(
            { metrics::GROUPS_SCHEDULED } = groups.len(),
            { metrics::NODES_PROCESSED } = graph.len(),
            "scheduling one build per group"
        );

        let mut result = BatchResult::default();
        for group in &groups {
            let nodes: Vec<_> = group.iter().filter_map(|&id| graph.get(id)).collect();
            let batch: BTreeSet<Fix> = nodes
                .iter()
                .flat_map(|node| node.tree.iter().cloned())
                .collect();

            ctx.measure(&batch)?;
            result.builds += 1;

            let batch_idx = result.batches.len();
            for node in nodes {
                let mut diff = ErrorDiff::default();
                for region in &node.regions {
                    diff.absorb(ctx.error_store.compare_by_region(region)?);
                }
                result.outcomes.push(ctx.outcome(node, diff, batch_idx));
            }
            result.batches.push(batch);
        }
        Ok(result)
    }
}
