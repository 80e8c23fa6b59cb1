//! Fact table errors (checker and extractor output).

use super::error_code::{self, NullsafeErrorCode};

/// Errors reading the tab-separated fact tables produced by the checker
/// and the symbol extractor.
#[derive(Debug, thiserror::Error)]
pub enum FactError {
    #[error("Fact file not found: {path}")]
    MissingFile { path: String },

    #[error("Failed to read fact file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Malformed row in {path} at line {line}: {message}")]
    Malformed {
        path: String,
        line: usize,
        message: String,
    },
}

impl NullsafeErrorCode for FactError {
    fn error_code(&self) -> &'static str {
        error_code::FACT_ERROR
    }
}
