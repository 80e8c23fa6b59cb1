//! AnnotatorEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing an annotation run.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about.
pub trait AnnotatorEventHandler: Send + Sync {
    // ---- Builds ----
    fn on_build_started(&self, _event: &BuildStartedEvent) {}
    fn on_build_completed(&self, _event: &BuildCompletedEvent) {}

    // ---- Scheduling ----
    fn on_groups_scheduled(&self, _event: &GroupsScheduledEvent) {}
    fn on_depth_completed(&self, _event: &DepthCompletedEvent) {}

    // ---- Outer loop ----
    fn on_iteration_completed(&self, _event: &IterationCompletedEvent) {}
    fn on_fixes_injected(&self, _event: &FixesInjectedEvent) {}

    // ---- Errors ----
    fn on_error(&self, _event: &ErrorEvent) {}
}
