//! External build invocation errors.

use super::error_code::{self, NullsafeErrorCode};

/// Errors raised while running a module's build command.
///
/// A non-zero exit status is not an error: the checker reports through its
/// fact files, which are validated separately (see `FactError`).
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to spawn build command `{command}`: {message}")]
    Spawn { command: String, message: String },

    #[error("Build command `{command}` was terminated by a signal")]
    Terminated { command: String },

    #[error("Build command for module {module} is empty")]
    EmptyCommand { module: String },
}

impl NullsafeErrorCode for BuildError {
    fn error_code(&self) -> &'static str {
        error_code::BUILD_ERROR
    }
}
