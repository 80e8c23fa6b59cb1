//! Event payload types for annotation run events.

/// Payload for `on_build_started`.
#[derive(Debug, Clone)]
pub struct BuildStartedEvent {
    pub module: String,
    /// Number of candidates injected for this build (0 for a baseline build).
    pub injected: usize,
}

/// Payload for `on_build_completed`.
#[derive(Debug, Clone)]
pub struct BuildCompletedEvent {
    pub module: String,
    pub duration_ms: u64,
    /// Whether the build command exited with status 0.
    pub success: bool,
}

/// Payload for `on_groups_scheduled`.
#[derive(Debug, Clone)]
pub struct GroupsScheduledEvent {
    pub strategy: &'static str,
    pub groups: usize,
    pub nodes: usize,
}

/// Payload for `on_depth_completed`.
#[derive(Debug, Clone)]
pub struct DepthCompletedEvent {
    pub depth: u32,
    pub nodes: usize,
    pub finished_reports: usize,
}

/// Payload for `on_iteration_completed`.
#[derive(Debug, Clone)]
pub struct IterationCompletedEvent {
    pub iteration: u32,
    pub reports: usize,
    pub approved: usize,
}

/// Payload for `on_fixes_injected`.
#[derive(Debug, Clone)]
pub struct FixesInjectedEvent {
    pub module: String,
    pub count: usize,
}

/// Payload for `on_error`.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
}
