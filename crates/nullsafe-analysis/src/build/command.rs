//! Checker backed by a shell build command and `errors.tsv` fact files.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use nullsafe_core::constants::ERRORS_FILE;
use nullsafe_core::errors::{BuildError, FactError};

use super::Checker;
use crate::facts::{self, FieldRegistry};
use crate::model::ReportedError;

#[derive(Debug, Clone)]
pub struct CommandChecker {
    module: String,
    command: String,
    fact_dirs: Vec<PathBuf>,
    annotation: String,
    fields: FieldRegistry,
    redirect_output: bool,
}

impl CommandChecker {
    pub fn new(
        module: impl Into<String>,
        command: impl Into<String>,
        fact_dirs: Vec<PathBuf>,
        annotation: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            command: command.into(),
            fact_dirs,
            annotation: annotation.into(),
            fields: FieldRegistry::new(),
            redirect_output: true,
        }
    }

    /// Field declarations used to widen field locations in error rows.
    pub fn with_fields(mut self, fields: FieldRegistry) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_redirect_output(mut self, redirect: bool) -> Self {
        self.redirect_output = redirect;
        self
    }
}

impl Checker for CommandChecker {
    fn module_name(&self) -> &str {
        &self.module
    }

    fn build(&mut self) -> Result<bool, BuildError> {
        if self.command.trim().is_empty() {
            return Err(BuildError::EmptyCommand {
                module: self.module.clone(),
            });
        }
        let mut cmd = Command::new("/bin/sh");
        cmd.arg("-c").arg(&self.command);
        if self.redirect_output {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }
        let status = cmd.status().map_err(|e| BuildError::Spawn {
            command: self.command.clone(),
            message: e.to_string(),
        })?;
        match status.code() {
            Some(code) => Ok(code == 0),
            None => Err(BuildError::Terminated {
                command: self.command.clone(),
            }),
        }
    }

    /// Every fact dir must contain an errors table after a build.
    fn reported_errors(&self) -> Result<Vec<ReportedError>, FactError> {
        let mut errors = Vec::new();
        for dir in &self.fact_dirs {
            errors.extend(facts::read_errors(
                &dir.join(ERRORS_FILE),
                &self.annotation,
                &self.fields,
            )?);
        }
        Ok(errors)
    }
}
