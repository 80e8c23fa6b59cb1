//! Readers for the fact tables produced by the checker and the extractor.

pub mod errors;
pub mod fields;
pub mod methods;
pub mod module;
pub mod tsv;
pub mod usages;

pub use errors::read_errors;
pub use fields::{FieldDeclaration, FieldRegistry};
pub use methods::{MethodRecord, MethodRegistry, Visibility};
pub use module::ModuleInfo;
pub use usages::{UsageRecord, UsageTable};
