//! Run-level errors.

use super::error_code::{self, NullsafeErrorCode};
use super::{BuildError, CacheError, ConfigError, FactError, InjectionError};

/// Errors that abort an annotation run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum AnnotatorError {
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    #[error("Fact error: {0}")]
    Fact(#[from] FactError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Injection error: {0}")]
    Injection(#[from] InjectionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write output {path}: {message}")]
    Output { path: String, message: String },
}

impl NullsafeErrorCode for AnnotatorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Build(e) => e.error_code(),
            Self::Fact(e) => e.error_code(),
            Self::Cache(e) => e.error_code(),
            Self::Injection(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Output { .. } => error_code::OUTPUT_ERROR,
        }
    }
}
