//! Virtual injection: side files the checker treats as extra annotations
//! on library code, used for dependent modules.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use nullsafe_core::constants::{NULLABLE_FIELDS_FILE, NULLABLE_METHODS_FILE};
use nullsafe_core::errors::InjectionError;

use super::AnnotationInjector;
use crate::model::{Fix, Location};

/// Maintains `nullable-methods.tsv` (`class\tmethod`) and
/// `nullable-fields.tsv` (`class\tfield`) in a library model directory.
/// Parameter and class candidates are ignored.
#[derive(Debug, Clone)]
pub struct VirtualInjector {
    dir: PathBuf,
}

impl VirtualInjector {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn methods_file(&self) -> PathBuf {
        self.dir.join(NULLABLE_METHODS_FILE)
    }

    pub fn fields_file(&self) -> PathBuf {
        self.dir.join(NULLABLE_FIELDS_FILE)
    }
}

fn write(path: &Path, lines: &[String]) -> Result<(), InjectionError> {
    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    path.parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|_| std::fs::write(path, content))
        .map_err(|e| InjectionError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

impl AnnotationInjector for VirtualInjector {
    fn inject(&mut self, fixes: &BTreeSet<Fix>) -> Result<(), InjectionError> {
        let mut methods = Vec::new();
        let mut fields = Vec::new();
        for fix in fixes {
            match &fix.location {
                Location::Method { class, method } => methods.push(format!("{class}\t{method}")),
                Location::Field { class, variables } => {
                    fields.extend(variables.iter().map(|v| format!("{class}\t{v}")))
                }
                _ => {}
            }
        }
        write(&self.methods_file(), &methods)?;
        write(&self.fields_file(), &fields)
    }

    /// Clears both side files, whatever `fixes` holds.
    fn remove(&mut self, _fixes: &BTreeSet<Fix>) -> Result<(), InjectionError> {
        for path in [self.methods_file(), self.fields_file()] {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(InjectionError::Io {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })
                }
            }
        }
        Ok(())
    }
}
