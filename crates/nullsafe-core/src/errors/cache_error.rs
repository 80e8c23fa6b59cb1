//! Impact cache and diff store errors.

use super::error_code::{self, NullsafeErrorCode};

/// Cache inconsistencies. All variants are logic errors and abort the run.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Impact for {location} is already registered")]
    DuplicateImpact { location: String },

    #[error("No {snapshot} error snapshot has been taken")]
    MissingSnapshot { snapshot: &'static str },

    #[error("Batch result references unknown node {node}")]
    UnknownNode { node: usize },
}

impl NullsafeErrorCode for CacheError {
    fn error_code(&self) -> &'static str {
        error_code::CACHE_ERROR
    }
}
