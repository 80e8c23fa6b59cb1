//! External build invocation and reading its reported errors.

pub mod command;

use std::time::Instant;

use nullsafe_core::errors::{AnnotatorError, BuildError, FactError};
use nullsafe_core::events::types::{BuildCompletedEvent, BuildStartedEvent};
use nullsafe_core::events::EventDispatcher;
use nullsafe_core::tracing::metrics;

use crate::model::ReportedError;

pub use command::CommandChecker;

/// A module build driven by the external checker.
pub trait Checker {
    fn module_name(&self) -> &str;

    /// Runs the build to completion. Returns whether it exited successfully;
    /// a failed exit is not an error as long as fact files are produced.
    fn build(&mut self) -> Result<bool, BuildError>;

    /// Errors from the fact files of the last build.
    fn reported_errors(&self) -> Result<Vec<ReportedError>, FactError>;
}

/// Builds once and returns the reported errors, emitting build events.
pub fn build_and_collect(
    checker: &mut dyn Checker,
    events: &EventDispatcher,
    injected: usize,
) -> Result<Vec<ReportedError>, AnnotatorError> {
    let module = checker.module_name().to_string();
    events.emit_build_started(&BuildStartedEvent {
        module: module.clone(),
        injected,
    });
    let start = Instant::now();
    let success = checker.build()?;
    let duration_ms = start.elapsed().as_millis() as u64;
    events.emit_build_completed(&BuildCompletedEvent {
        module: module.clone(),
        duration_ms,
        success,
    });
    if !success {
        tracing::warn!(%module, "build exited with a failure status");
    }
    let errors = checker.reported_errors()?;
    tracing::debug!(%module, { metrics::BUILD_TIME } = duration_ms, errors = errors.len(), "build finished");
    Ok(errors)
}
