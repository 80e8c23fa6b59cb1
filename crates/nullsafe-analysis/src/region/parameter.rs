//! Impacted regions of a parameter candidate.

use std::collections::BTreeSet;

use crate::facts::ModuleInfo;
use crate::model::{names, Region};

/// Overriding methods (transitively), the enclosing method, every call site
/// of it, and for constructor parameters the class initializer region.
pub fn impacted_regions(
    module: &ModuleInfo,
    class: &str,
    method: &str,
    index: usize,
) -> BTreeSet<Region> {
    let mut regions: BTreeSet<Region> = module
        .methods
        .sub_methods(class, method, true)
        .into_iter()
        .map(|m| m.region())
        .collect();
    regions.insert(Region::new(class, method));
    regions.extend(module.method_usages.regions_using(class, method));
    if names::is_constructor(class, method) {
        regions.insert(Region::init_block(class));
    }
    if module.methods.find(class, method).is_none() {
        tracing::debug!(class, method, index, "parameter owner not declared in module facts");
    }
    regions
}
