//! Configuration system for nullsafe.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod annotator_config;
pub mod module_config;
pub mod nullsafe_config;

pub use annotator_config::AnnotatorConfig;
pub use module_config::{DownstreamConfig, OutputConfig, TargetConfig};
pub use nullsafe_config::{CliOverrides, NullsafeConfig};
