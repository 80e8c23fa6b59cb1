//! Physical injection through an external source editor.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use nullsafe_core::constants::CHANGES_FILE;
use nullsafe_core::errors::InjectionError;

use super::{AnnotationInjector, ChangeAction, ChangeRecord};
use crate::model::Fix;

/// Writes change records to `<work_dir>/changes.json` and runs
/// `<command> <file>` through `/bin/sh -c`.
#[derive(Debug, Clone)]
pub struct CommandInjector {
    command: String,
    work_dir: PathBuf,
    redirect_output: bool,
}

impl CommandInjector {
    pub fn new(command: impl Into<String>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            work_dir: work_dir.into(),
            redirect_output: true,
        }
    }

    pub fn with_redirect_output(mut self, redirect: bool) -> Self {
        self.redirect_output = redirect;
        self
    }

    fn apply(&self, action: ChangeAction, fixes: &BTreeSet<Fix>) -> Result<(), InjectionError> {
        if fixes.is_empty() {
            return Ok(());
        }
        let records: Vec<ChangeRecord> = fixes.iter().map(|f| ChangeRecord::new(action, f)).collect();
        let json = serde_json::to_string_pretty(&records).map_err(|e| InjectionError::Serialize {
            message: e.to_string(),
        })?;

        let file = self.work_dir.join(CHANGES_FILE);
        std::fs::create_dir_all(&self.work_dir)
            .and_then(|_| std::fs::write(&file, json))
            .map_err(|e| InjectionError::Io {
                path: file.display().to_string(),
                message: e.to_string(),
            })?;

        let line = format!("{} {}", self.command, file.display());
        let mut cmd = Command::new("/bin/sh");
        cmd.arg("-c").arg(&line);
        if self.redirect_output {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }
        let status = cmd.status().map_err(|e| InjectionError::CommandFailed {
            command: line.clone(),
            message: e.to_string(),
        })?;
        if !status.success() {
            return Err(InjectionError::CommandFailed {
                command: line,
                message: format!("exit status {status}"),
            });
        }
        tracing::debug!(count = records.len(), ?action, "applied change records");
        Ok(())
    }
}

impl AnnotationInjector for CommandInjector {
    fn inject(&mut self, fixes: &BTreeSet<Fix>) -> Result<(), InjectionError> {
        self.apply(ChangeAction::Add, fixes)
    }

    fn remove(&mut self, fixes: &BTreeSet<Fix>) -> Result<(), InjectionError> {
        self.apply(ChangeAction::Remove, fixes)
    }
}
