//! Region impact index: which regions a candidate can change.
//!
//! The computed sets must over-approximate the true impact. A missing
//! region lets two interacting candidates share a build and corrupts the
//! per-node attribution; an extra region only costs another build.

pub mod field;
pub mod method;
pub mod parameter;

use std::collections::BTreeSet;

use crate::facts::ModuleInfo;
use crate::model::{Fix, Location, Region};

/// Source of impacted regions for candidate locations.
pub trait RegionRegistry {
    fn impacted_regions(&self, location: &Location) -> BTreeSet<Region>;

    /// Union over every candidate of a tree.
    fn impacted_regions_of_tree(&self, tree: &BTreeSet<Fix>) -> BTreeSet<Region> {
        tree.iter()
            .flat_map(|fix| self.impacted_regions(&fix.location))
            .collect()
    }
}

impl RegionRegistry for ModuleInfo {
    fn impacted_regions(&self, location: &Location) -> BTreeSet<Region> {
        match location {
            Location::Method { class, method } => method::impacted_regions(self, class, method),
            Location::Parameter {
                class,
                method,
                index,
            } => parameter::impacted_regions(self, class, method, *index),
            Location::Field { class, variables } => {
                field::impacted_regions(self, class, variables)
            }
            Location::Class { class } => class_regions(self, class),
        }
    }
}

/// A class-level annotation can affect any member of the class.
fn class_regions(module: &ModuleInfo, class: &str) -> BTreeSet<Region> {
    let mut regions = module.method_usages.regions_using_class(class);
    regions.extend(module.field_usages.regions_using_class(class));
    regions.extend(module.methods.methods_of(class).iter().map(|m| m.region()));
    regions.insert(Region::init_block(class));
    regions
}
