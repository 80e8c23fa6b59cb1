//! Graph processors: inject, rebuild, diff, attribute, revert.

pub mod batched;
pub mod sequential;

use std::collections::BTreeSet;

use nullsafe_core::errors::AnnotatorError;
use nullsafe_core::events::EventDispatcher;

use crate::build::{self, Checker};
use crate::cache::{DownstreamImpactCache, ErrorDiff, ErrorStore};
use crate::facts::{MethodRegistry, ModuleInfo};
use crate::graph::{ConflictGraph, Node};
use crate::inject::AnnotationInjector;
use crate::model::{Fix, ReportedError};

pub use batched::BatchedProcessor;
pub use sequential::SequentialProcessor;

/// Collaborators shared by every processor and evaluator pass.
pub struct ProcessorContext<'a> {
    /// Module whose builds are measured and whose usages drive regions.
    pub module: &'a ModuleInfo,
    /// Declarations of the module under mutation.
    pub target: &'a MethodRegistry,
    pub checker: &'a mut dyn Checker,
    pub injector: &'a mut dyn AnnotationInjector,
    pub error_store: &'a mut ErrorStore,
    pub downstream: &'a dyn DownstreamImpactCache,
    pub events: &'a EventDispatcher,
}

impl ProcessorContext<'_> {
    /// Injects `batch`, rebuilds, stores the current snapshot and reverts.
    /// On failure the batch is still reverted before the error propagates.
    pub(crate) fn measure(&mut self, batch: &BTreeSet<Fix>) -> Result<(), AnnotatorError> {
        self.injector.inject(batch)?;
        match build::build_and_collect(self.checker, self.events, batch.len()) {
            Ok(errors) => {
                self.error_store.save_current(errors);
                self.injector.remove(batch)?;
                Ok(())
            }
            Err(err) => {
                if let Err(revert) = self.injector.remove(batch) {
                    tracing::error!(error = %revert, "failed to revert batch after build failure");
                }
                Err(err)
            }
        }
    }

    /// Outcome of `node` given its attributable diff.
    pub(crate) fn outcome(&self, node: &Node, diff: ErrorDiff, batch: usize) -> NodeOutcome {
        NodeOutcome {
            node: node.id,
            local_effect: diff.delta,
            triggered_errors: diff.new_errors,
            triggered_fixes_from_downstream: self
                .downstream
                .triggered_fixes_for_collection(&node.tree, self.target),
            batch,
        }
    }
}

/// Measurement of one node in one pass.
#[derive(Debug, Clone)]
pub struct NodeOutcome {
    pub node: usize,
    pub local_effect: i64,
    pub triggered_errors: Vec<ReportedError>,
    pub triggered_fixes_from_downstream: BTreeSet<Fix>,
    /// Index into `BatchResult::batches` of the batch the node was built in.
    pub batch: usize,
}

/// Immutable result of one processor pass, folded into the graph by the
/// driver through `ConflictGraph::apply`.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub outcomes: Vec<NodeOutcome>,
    /// Candidates injected together for each build.
    pub batches: Vec<BTreeSet<Fix>>,
    pub builds: usize,
}

pub trait ConflictGraphProcessor {
    fn name(&self) -> &'static str;

    /// Measures every node of `graph`. Node regions must be current.
    fn process(
        &self,
        ctx: &mut ProcessorContext<'_>,
        graph: &ConflictGraph,
    ) -> Result<BatchResult, AnnotatorError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorStrategy {
    Sequential,
    Batched,
}

impl ProcessorStrategy {
    /// Parses a configured strategy name; `parallel` is an alias of `batched`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "sequential" => Some(Self::Sequential),
            "batched" | "parallel" => Some(Self::Batched),
            _ => None,
        }
    }

    pub fn processor(self) -> Box<dyn ConflictGraphProcessor> {
        match self {
            Self::Sequential => Box::new(SequentialProcessor),
            Self::Batched => Box::new(BatchedProcessor),
        }
    }
}
