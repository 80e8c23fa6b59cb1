//! `field_declarations.tsv`: field declarations of a module.

use std::path::PathBuf;

use nullsafe_core::errors::FactError;
use nullsafe_core::types::collections::FxHashMap;

use super::tsv;
use crate::model::Location;

const COLUMNS: usize = 4;

/// One field declaration statement, possibly declaring several variables.
#[derive(Debug, Clone)]
pub struct FieldDeclaration {
    pub class: String,
    pub variables: Vec<String>,
    /// Whether the declaration carries an initializer.
    pub initialized: bool,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    declarations: Vec<FieldDeclaration>,
    /// (class, variable) -> index into `declarations`.
    by_variable: FxHashMap<(String, String), usize>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads declarations from every directory; absent tables are skipped.
    /// Columns: class, comma-separated variables, initialized flag, path.
    pub fn load(dirs: &[PathBuf], file_name: &str) -> Result<Self, FactError> {
        let mut registry = Self::new();
        for dir in dirs {
            let path = dir.join(file_name);
            for row in tsv::read_optional_table(&path, COLUMNS)? {
                registry.push(FieldDeclaration {
                    class: row.get(0).to_string(),
                    variables: row
                        .get(1)
                        .split(',')
                        .map(str::trim)
                        .filter(|v| !v.is_empty())
                        .map(str::to_string)
                        .collect(),
                    initialized: row.parse::<bool>(2, &path)?,
                    path: row.optional(3).map(|p| PathBuf::from(tsv::uri_to_path(p))),
                });
            }
        }
        Ok(registry)
    }

    pub fn push(&mut self, declaration: FieldDeclaration) {
        let idx = self.declarations.len();
        for variable in &declaration.variables {
            self.by_variable
                .insert((declaration.class.clone(), variable.clone()), idx);
        }
        self.declarations.push(declaration);
    }

    pub fn find(&self, class: &str, variable: &str) -> Option<&FieldDeclaration> {
        self.by_variable
            .get(&(class.to_string(), variable.to_string()))
            .map(|&idx| &self.declarations[idx])
    }

    /// Location covering the whole declaration of `variable`. Unknown fields
    /// get a single-variable location.
    pub fn location_of(&self, class: &str, variable: &str) -> Location {
        match self.find(class, variable) {
            Some(decl) => Location::field(class, decl.variables.iter().cloned()),
            None => Location::field(class, [variable]),
        }
    }

    /// True if any variable of the field location is declared without an
    /// initializer, so constructors must assign it.
    pub fn is_uninitialized(&self, class: &str, variables: &[&str]) -> bool {
        variables
            .iter()
            .any(|v| self.find(class, v).is_some_and(|decl| !decl.initialized))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
