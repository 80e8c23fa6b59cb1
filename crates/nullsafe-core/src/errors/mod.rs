//! Error handling for nullsafe.
//! One error enum per subsystem, `thiserror` only.

pub mod annotator_error;
pub mod build_error;
pub mod cache_error;
pub mod config_error;
pub mod error_code;
pub mod fact_error;
pub mod injection_error;

pub use annotator_error::AnnotatorError;
pub use build_error::BuildError;
pub use cache_error::CacheError;
pub use config_error::ConfigError;
pub use error_code::NullsafeErrorCode;
pub use fact_error::FactError;
pub use injection_error::InjectionError;
