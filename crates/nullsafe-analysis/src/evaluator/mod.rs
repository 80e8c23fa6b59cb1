//! Fixpoint driver: grows candidate trees over depth levels.

pub mod basic;
pub mod cached;
pub mod report;

use std::collections::BTreeSet;

use nullsafe_core::errors::AnnotatorError;

use crate::model::Fix;
use crate::processor::ProcessorContext;

pub use basic::BasicEvaluator;
pub use cached::CachedEvaluator;
pub use report::{Report, Tag};

/// Evaluates root candidates against the baseline held in the context's
/// error store. Returns one report per root, in root order.
pub trait Evaluator {
    fn evaluate(
        &mut self,
        ctx: &mut ProcessorContext<'_>,
        fixes: &BTreeSet<Fix>,
    ) -> Result<Vec<Report>, AnnotatorError>;
}
