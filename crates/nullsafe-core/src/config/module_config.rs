//! Per-module configuration: the target module and its downstream dependents.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The module under mutation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TargetConfig {
    /// Module name used in logs and events. Default: "target".
    pub name: Option<String>,
    /// Shell command that rebuilds the module and regenerates its fact files.
    pub build_command: Option<String>,
    /// Directories holding the checker and extractor output for this module.
    pub fact_dirs: Vec<PathBuf>,
    /// Shell command invoked with the path of a change file to edit sources.
    pub edit_command: Option<String>,
    /// Scratch directory for change files. Default: first fact dir.
    pub work_dir: Option<PathBuf>,
}

impl TargetConfig {
    pub fn effective_name(&self) -> &str {
        self.name.as_deref().unwrap_or("target")
    }

    /// Returns the scratch directory, falling back to the first fact dir.
    pub fn effective_work_dir(&self) -> Option<PathBuf> {
        self.work_dir
            .clone()
            .or_else(|| self.fact_dirs.first().cloned())
    }
}

/// Modules that depend on the target module.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Enable the downstream impact pre-scan. Default: false.
    pub enabled: Option<bool>,
    /// Shell command that rebuilds every dependent module.
    pub build_command: Option<String>,
    /// Fact directories of the dependent modules.
    pub fact_dirs: Vec<PathBuf>,
    /// Directory receiving the virtual injection side files.
    pub library_model_dir: Option<PathBuf>,
}

impl DownstreamConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }
}

/// Where reports and run logs are written.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: Option<PathBuf>,
}
