//! Run statistics collected from engine events.

use std::sync::atomic::{AtomicU64, Ordering};

use nullsafe_core::events::types::*;
use nullsafe_core::events::AnnotatorEventHandler;
use serde::Serialize;

/// Counts builds, build time, measured nodes and injected annotations.
#[derive(Debug, Default)]
pub struct RunLog {
    builds: AtomicU64,
    build_time_ms: AtomicU64,
    nodes: AtomicU64,
    injected: AtomicU64,
    iterations: AtomicU64,
}

/// Serializable view of a `RunLog`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub builds: u64,
    pub build_time_ms: u64,
    pub nodes: u64,
    pub injected: u64,
    pub iterations: u64,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            builds: self.builds.load(Ordering::Relaxed),
            build_time_ms: self.build_time_ms.load(Ordering::Relaxed),
            nodes: self.nodes.load(Ordering::Relaxed),
            injected: self.injected.load(Ordering::Relaxed),
            iterations: self.iterations.load(Ordering::Relaxed),
        }
    }
}

impl AnnotatorEventHandler for RunLog {
    fn on_build_completed(&self, event: &BuildCompletedEvent) {
        self.builds.fetch_add(1, Ordering::Relaxed);
        self.build_time_ms
            .fetch_add(event.duration_ms, Ordering::Relaxed);
    }

    fn on_groups_scheduled(&self, event: &GroupsScheduledEvent) {
        self.nodes.fetch_add(event.nodes as u64, Ordering::Relaxed);
    }

    fn on_iteration_completed(&self, _event: &IterationCompletedEvent) {
        self.iterations.fetch_add(1, Ordering::Relaxed);
    }

    fn on_fixes_injected(&self, event: &FixesInjectedEvent) {
        self.injected.fetch_add(event.count as u64, Ordering::Relaxed);
    }
}
