//! Shared constants: defaults and fact/output file names.

/// Default fixpoint depth bound.
pub const DEFAULT_DEPTH: u32 = 5;

/// Default annotation inserted by the editor.
pub const DEFAULT_NULLABLE_ANNOTATION: &str = "javax.annotation.Nullable";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "nullsafe.toml";

// ---- Checker output ----

/// Reported errors, regenerated by every build.
pub const ERRORS_FILE: &str = "errors.tsv";

// ---- Extractor output (read once per run) ----

pub const METHOD_INFO_FILE: &str = "method_info.tsv";
pub const METHOD_USAGE_FILE: &str = "method_impacted_region_map.tsv";
pub const FIELD_USAGE_FILE: &str = "field_impacted_region_map.tsv";
pub const FIELD_DECLARATIONS_FILE: &str = "field_declarations.tsv";

// ---- Virtual injection side files ----

pub const NULLABLE_METHODS_FILE: &str = "nullable-methods.tsv";
pub const NULLABLE_FIELDS_FILE: &str = "nullable-fields.tsv";

// ---- Engine output ----

pub const CHANGES_FILE: &str = "changes.json";
pub const REPORTS_FILE: &str = "reports.json";
pub const LOG_FILE: &str = "log.json";

/// Placeholder used by fact tables for absent values.
pub const NULL_FIELD: &str = "null";

/// Region member naming a class's field-initializer / static-init block.
pub const INIT_REGION_MEMBER: &str = "null";

/// Method id reserved for the root of the override hierarchy.
pub const TOP_METHOD_ID: u32 = 0;
