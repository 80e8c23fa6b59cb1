//! NullsafeErrorCode trait for structured error reporting.

/// Trait for converting nullsafe errors to stable error codes.
/// Every error enum must implement this to provide a structured
/// error code string for reports and run logs.
pub trait NullsafeErrorCode {
    /// Returns the error code string (e.g., "BUILD_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const BUILD_ERROR: &str = "BUILD_ERROR";
pub const FACT_ERROR: &str = "FACT_ERROR";
pub const CACHE_ERROR: &str = "CACHE_ERROR";
pub const INJECTION_ERROR: &str = "INJECTION_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const OUTPUT_ERROR: &str = "OUTPUT_ERROR";
