//! One build per node.

use nullsafe_core::errors::AnnotatorError;
use nullsafe_core::events::types::GroupsScheduledEvent;

use super::{BatchResult, ConflictGraphProcessor, ProcessorContext};
use crate::graph::ConflictGraph;

/// Injects each node's tree alone and compares the whole project.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialProcessor;

impl ConflictGraphProcessor for SequentialProcessor {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        graph: &ConflictGraph,
    ) -> Result<BatchResult, AnnotatorError> {
        ctx.events.emit_groups_scheduled(&GroupsScheduledEvent {
            strategy: self.name(),
            groups: graph.len(),
            nodes: graph.len(),
        });
        tracing::info!(nodes = graph.len(), "scheduling one build per node");

        let mut result = BatchResult::default();
        for node in graph.nodes() {
            ctx.measure(&node.tree)?;
            result.builds += 1;
            let diff = ctx.error_store.compare()?;
            let batch = result.batches.len();
            result.batches.push(node.tree.clone());
            result.outcomes.push(ctx.outcome(node, diff, batch));
        }
        Ok(result)
    }
}
