//! Everything known about one module from its fact tables.

use std::path::PathBuf;
use std::sync::Arc;

use nullsafe_core::constants::{
    FIELD_DECLARATIONS_FILE, FIELD_USAGE_FILE, METHOD_INFO_FILE, METHOD_USAGE_FILE,
};
use nullsafe_core::errors::FactError;

use super::{FieldRegistry, MethodRegistry, UsageTable};

/// Declarations and usages of a module, read once per run.
#[derive(Debug, Clone)]
pub struct ModuleInfo {
    pub name: String,
    pub methods: Arc<MethodRegistry>,
    pub fields: FieldRegistry,
    pub method_usages: UsageTable,
    pub field_usages: UsageTable,
}

impl ModuleInfo {
    pub fn new(name: impl Into<String>, methods: MethodRegistry) -> Self {
        Self {
            name: name.into(),
            methods: Arc::new(methods),
            fields: FieldRegistry::new(),
            method_usages: UsageTable::new(),
            field_usages: UsageTable::new(),
        }
    }

    /// Loads declarations and usages from the module's fact directories.
    pub fn load(name: impl Into<String>, dirs: &[PathBuf]) -> Result<Self, FactError> {
        let name = name.into();
        let module = Self {
            methods: Arc::new(MethodRegistry::load(dirs, METHOD_INFO_FILE)?),
            fields: FieldRegistry::load(dirs, FIELD_DECLARATIONS_FILE)?,
            method_usages: UsageTable::load(dirs, METHOD_USAGE_FILE)?,
            field_usages: UsageTable::load(dirs, FIELD_USAGE_FILE)?,
            name,
        };
        tracing::info!(
            module = %module.name,
            methods = module.methods.len(),
            fields = module.fields.len(),
            method_usages = module.method_usages.len(),
            field_usages = module.field_usages.len(),
            "loaded module facts"
        );
        Ok(module)
    }

    /// Usages recorded in dependent modules, paired with the declarations of
    /// the module they depend on.
    pub fn load_dependents(
        name: impl Into<String>,
        dirs: &[PathBuf],
        target: &ModuleInfo,
    ) -> Result<Self, FactError> {
        Ok(Self {
            name: name.into(),
            methods: Arc::clone(&target.methods),
            fields: target.fields.clone(),
            method_usages: UsageTable::load(dirs, METHOD_USAGE_FILE)?,
            field_usages: UsageTable::load(dirs, FIELD_USAGE_FILE)?,
        })
    }
}
