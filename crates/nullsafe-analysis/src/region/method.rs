//! Impacted regions of a method return candidate.

use std::collections::BTreeSet;

use crate::facts::ModuleInfo;
use crate::model::Region;

/// Callers, the method itself, and the nearest overridden method.
pub fn impacted_regions(module: &ModuleInfo, class: &str, method: &str) -> BTreeSet<Region> {
    let mut regions = module.method_usages.regions_using(class, method);
    regions.insert(Region::new(class, method));
    match module.methods.closest_super_method(class, method) {
        Some(parent) => {
            regions.insert(parent.region());
        }
        None if module.methods.find(class, method).is_none() => {
            tracing::debug!(class, method, "method not declared in module facts");
        }
        None => {}
    }
    regions
}
