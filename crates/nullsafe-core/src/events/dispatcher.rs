//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::AnnotatorEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn AnnotatorEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn AnnotatorEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// Handlers that panic are caught and do not prevent subsequent handlers
    /// from receiving the event.
    fn emit<F: Fn(&dyn AnnotatorEventHandler)>(&self, f: F) {
        for (index, handler) in self.handlers.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                ::tracing::warn!(handler = index, "event handler panicked");
            }
        }
    }

    // ---- Builds ----
    pub fn emit_build_started(&self, event: &BuildStartedEvent) {
        self.emit(|h| h.on_build_started(event));
    }

    pub fn emit_build_completed(&self, event: &BuildCompletedEvent) {
        self.emit(|h| h.on_build_completed(event));
    }

    // ---- Scheduling ----
    pub fn emit_groups_scheduled(&self, event: &GroupsScheduledEvent) {
        self.emit(|h| h.on_groups_scheduled(event));
    }

    pub fn emit_depth_completed(&self, event: &DepthCompletedEvent) {
        self.emit(|h| h.on_depth_completed(event));
    }

    // ---- Outer loop ----
    pub fn emit_iteration_completed(&self, event: &IterationCompletedEvent) {
        self.emit(|h| h.on_iteration_completed(event));
    }

    pub fn emit_fixes_injected(&self, event: &FixesInjectedEvent) {
        self.emit(|h| h.on_fixes_injected(event));
    }

    // ---- Errors ----
    pub fn emit_error(&self, event: &ErrorEvent) {
        self.emit(|h| h.on_error(event));
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
