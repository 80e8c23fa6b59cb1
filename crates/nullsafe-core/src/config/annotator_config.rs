//! Search configuration: depth, strategy, acceptance mode and loop switches.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DEPTH, DEFAULT_NULLABLE_ANNOTATION};

/// Graph processor strategy names accepted in `annotator.strategy`.
pub const STRATEGIES: &[&str] = &["batched", "parallel", "sequential"];

/// Analysis mode names accepted in `annotator.mode`.
pub const MODES: &[&str] = &["local", "default", "lower_bound", "upper_bound", "strict"];

/// Configuration for the fixpoint search.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Fixpoint depth bound. Default: 5.
    pub depth: Option<u32>,
    /// Graph processor strategy. Default: "batched".
    pub strategy: Option<String>,
    /// Downstream acceptance mode. Default: "default" (lower bound).
    pub mode: Option<String>,
    /// Stop growing trees whose local effect is already non-positive. Default: true.
    pub bailout: Option<bool>,
    /// Inject the whole tree of an approved report instead of its root. Default: false.
    pub chain: Option<bool>,
    /// Repeat iterations until no new candidates appear. Default: true.
    pub outer_loop: Option<bool>,
    /// Skip roots already evaluated in an earlier iteration. Default: true.
    pub use_cache: Option<bool>,
    /// Reuse measured impacts across depth levels. Default: false.
    pub use_impact_cache: Option<bool>,
    /// Fully qualified annotation inserted by the editor.
    pub nullable_annotation: Option<String>,
    /// Send build output to null instead of inheriting stdio. Default: true.
    pub redirect_build_output: Option<bool>,
}

impl AnnotatorConfig {
    /// Returns the effective depth bound, defaulting to 5.
    pub fn effective_depth(&self) -> u32 {
        self.depth.unwrap_or(DEFAULT_DEPTH)
    }

    /// Returns the effective strategy, defaulting to "batched".
    pub fn effective_strategy(&self) -> &str {
        self.strategy.as_deref().unwrap_or("batched")
    }

    /// Returns the effective mode, defaulting to "default".
    pub fn effective_mode(&self) -> &str {
        self.mode.as_deref().unwrap_or("default")
    }

    pub fn effective_bailout(&self) -> bool {
        self.bailout.unwrap_or(true)
    }

    pub fn effective_chain(&self) -> bool {
        self.chain.unwrap_or(false)
    }

    pub fn effective_outer_loop(&self) -> bool {
        self.outer_loop.unwrap_or(true)
    }

    pub fn effective_use_cache(&self) -> bool {
        self.use_cache.unwrap_or(true)
    }

    pub fn effective_use_impact_cache(&self) -> bool {
        self.use_impact_cache.unwrap_or(false)
    }

    pub fn effective_nullable_annotation(&self) -> &str {
        self.nullable_annotation
            .as_deref()
            .unwrap_or(DEFAULT_NULLABLE_ANNOTATION)
    }

    pub fn effective_redirect_build_output(&self) -> bool {
        self.redirect_build_output.unwrap_or(true)
    }
}
