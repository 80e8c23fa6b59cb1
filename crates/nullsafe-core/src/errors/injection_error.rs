//! Annotation injection errors.

use super::error_code::{self, NullsafeErrorCode};

/// Errors applying or reverting candidate annotations.
#[derive(Debug, thiserror::Error)]
pub enum InjectionError {
    #[error("Failed to write {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to serialize change records: {message}")]
    Serialize { message: String },

    #[error("Edit command `{command}` failed: {message}")]
    CommandFailed { command: String, message: String },
}

impl NullsafeErrorCode for InjectionError {
    fn error_code(&self) -> &'static str {
        error_code::INJECTION_ERROR
    }
}
