//! Impacted regions of a field candidate.

use std::collections::BTreeSet;

use crate::facts::ModuleInfo;
use crate::model::Region;

/// Regions reading the field, the declaration itself, and every constructor
/// of the class when the declaration has no initializer.
pub fn impacted_regions(
    module: &ModuleInfo,
    class: &str,
    variables: &BTreeSet<String>,
) -> BTreeSet<Region> {
    let mut regions = module.field_usages.regions_using_any(class, variables);
    regions.extend(variables.iter().map(|v| Region::new(class, v.as_str())));
    let names: Vec<&str> = variables.iter().map(String::as_str).collect();
    if module.fields.is_uninitialized(class, &names) {
        regions.extend(module.methods.constructors_of(class).iter().map(|c| c.region()));
        regions.insert(Region::init_block(class));
    }
    regions
}
