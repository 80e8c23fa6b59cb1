//! Structured span field definitions for nullsafe metrics.
//!
//! These constants define the standard field names used in tracing spans
//! across the engine, so build logs can be queried consistently.

/// Build: wall time of one external build in milliseconds.
pub const BUILD_TIME: &str = "build_time";

/// Processor: number of coloring groups scheduled in one pass.
pub const GROUPS_SCHEDULED: &str = "groups_scheduled";

/// Processor: number of nodes processed in one pass.
pub const NODES_PROCESSED: &str = "nodes_processed";

/// Evaluator: current fixpoint depth.
pub const DEPTH: &str = "depth";

/// Node: measured effect after inheritance correction.
pub const EFFECT: &str = "effect";

/// Annotator: outer loop iteration number.
pub const ITERATION: &str = "iteration";
