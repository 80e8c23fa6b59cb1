//! Top-level nullsafe configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::annotator_config::{MODES, STRATEGIES};
use super::{AnnotatorConfig, DownstreamConfig, OutputConfig, TargetConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`NULLSAFE_*`)
/// 3. Project config (`nullsafe.toml` in project root)
/// 4. User config (`~/.nullsafe/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NullsafeConfig {
    pub annotator: AnnotatorConfig,
    pub target: TargetConfig,
    pub downstream: DownstreamConfig,
    pub output: OutputConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub depth: Option<u32>,
    pub strategy: Option<String>,
    pub mode: Option<String>,
    pub chain: Option<bool>,
    pub build_command: Option<String>,
    pub output_dir: Option<PathBuf>,
}

impl NullsafeConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(e) => {
                        ::tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &NullsafeConfig) -> Result<(), ConfigError> {
        if let Some(ref strategy) = config.annotator.strategy {
            if !STRATEGIES.contains(&strategy.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "annotator.strategy".to_string(),
                    message: format!("unknown strategy '{strategy}', expected one of {STRATEGIES:?}"),
                });
            }
        }
        if let Some(ref mode) = config.annotator.mode {
            if !MODES.contains(&mode.trim().to_ascii_lowercase().as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "annotator.mode".to_string(),
                    message: format!("unknown mode '{mode}', expected one of {MODES:?}"),
                });
            }
        }
        if let Some(ref command) = config.target.build_command {
            if command.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "target.build_command".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if config.downstream.effective_enabled() {
            let has_command = config
                .downstream
                .build_command
                .as_deref()
                .is_some_and(|c| !c.trim().is_empty());
            if !has_command {
                return Err(ConfigError::ValidationFailed {
                    field: "downstream.build_command".to_string(),
                    message: "required when downstream analysis is enabled".to_string(),
                });
            }
            if config.downstream.fact_dirs.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "downstream.fact_dirs".to_string(),
                    message: "required when downstream analysis is enabled".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.nullsafe/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut NullsafeConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: NullsafeConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` (or non-empty) value.
    fn merge(base: &mut NullsafeConfig, other: &NullsafeConfig) {
        // Annotator
        let (a, o) = (&mut base.annotator, &other.annotator);
        if o.depth.is_some() {
            a.depth = o.depth;
        }
        if o.strategy.is_some() {
            a.strategy = o.strategy.clone();
        }
        if o.mode.is_some() {
            a.mode = o.mode.clone();
        }
        if o.bailout.is_some() {
            a.bailout = o.bailout;
        }
        if o.chain.is_some() {
            a.chain = o.chain;
        }
        if o.outer_loop.is_some() {
            a.outer_loop = o.outer_loop;
        }
        if o.use_cache.is_some() {
            a.use_cache = o.use_cache;
        }
        if o.use_impact_cache.is_some() {
            a.use_impact_cache = o.use_impact_cache;
        }
        if o.nullable_annotation.is_some() {
            a.nullable_annotation = o.nullable_annotation.clone();
        }
        if o.redirect_build_output.is_some() {
            a.redirect_build_output = o.redirect_build_output;
        }

        // Target
        let (t, o) = (&mut base.target, &other.target);
        if o.name.is_some() {
            t.name = o.name.clone();
        }
        if o.build_command.is_some() {
            t.build_command = o.build_command.clone();
        }
        if !o.fact_dirs.is_empty() {
            t.fact_dirs = o.fact_dirs.clone();
        }
        if o.edit_command.is_some() {
            t.edit_command = o.edit_command.clone();
        }
        if o.work_dir.is_some() {
            t.work_dir = o.work_dir.clone();
        }

        // Downstream
        let (d, o) = (&mut base.downstream, &other.downstream);
        if o.enabled.is_some() {
            d.enabled = o.enabled;
        }
        if o.build_command.is_some() {
            d.build_command = o.build_command.clone();
        }
        if !o.fact_dirs.is_empty() {
            d.fact_dirs = o.fact_dirs.clone();
        }
        if o.library_model_dir.is_some() {
            d.library_model_dir = o.library_model_dir.clone();
        }

        // Output
        if other.output.dir.is_some() {
            base.output.dir = other.output.dir.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `NULLSAFE_DEPTH`, `NULLSAFE_STRATEGY`, etc.
    fn apply_env_overrides(config: &mut NullsafeConfig) {
        if let Ok(val) = std::env::var("NULLSAFE_DEPTH") {
            if let Ok(v) = val.parse::<u32>() {
                config.annotator.depth = Some(v);
            }
        }
        if let Ok(val) = std::env::var("NULLSAFE_STRATEGY") {
            config.annotator.strategy = Some(val);
        }
        if let Ok(val) = std::env::var("NULLSAFE_MODE") {
            config.annotator.mode = Some(val);
        }
        if let Ok(val) = std::env::var("NULLSAFE_CHAIN") {
            if let Ok(v) = val.parse::<bool>() {
                config.annotator.chain = Some(v);
            }
        }
        if let Ok(val) = std::env::var("NULLSAFE_BUILD_COMMAND") {
            config.target.build_command = Some(val);
        }
        if let Ok(val) = std::env::var("NULLSAFE_DOWNSTREAM_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.downstream.enabled = Some(v);
            }
        }
        if let Ok(val) = std::env::var("NULLSAFE_OUTPUT_DIR") {
            config.output.dir = Some(PathBuf::from(val));
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut NullsafeConfig, cli: &CliOverrides) {
        if let Some(v) = cli.depth {
            config.annotator.depth = Some(v);
        }
        if let Some(ref v) = cli.strategy {
            config.annotator.strategy = Some(v.clone());
        }
        if let Some(ref v) = cli.mode {
            config.annotator.mode = Some(v.clone());
        }
        if let Some(v) = cli.chain {
            config.annotator.chain = Some(v);
        }
        if let Some(ref v) = cli.build_command {
            config.target.build_command = Some(v.clone());
        }
        if let Some(ref v) = cli.output_dir {
            config.output.dir = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level config directory: `~/.nullsafe/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".nullsafe"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
