//! Regions: the unit of error attribution.

use std::fmt;

use nullsafe_core::constants::INIT_REGION_MEMBER;
use serde::{Deserialize, Serialize};

use super::names;

/// Kind of code block a region names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Method,
    Constructor,
    Field,
    InitBlock,
}

/// A block of code that independently accrues reported errors, keyed by
/// enclosing class and member signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Region {
    pub class: String,
    pub member: String,
}

impl Region {
    pub fn new(class: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            member: member.into(),
        }
    }

    /// The field-initializer / static-init region of `class`.
    pub fn init_block(class: impl Into<String>) -> Self {
        Self::new(class, INIT_REGION_MEMBER)
    }

    pub fn kind(&self) -> RegionKind {
        if self.member == INIT_REGION_MEMBER {
            RegionKind::InitBlock
        } else if !self.member.contains('(') {
            RegionKind::Field
        } else if names::callable_name(&self.member) == names::simple_class_name(&self.class) {
            RegionKind::Constructor
        } else {
            RegionKind::Method
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.class, self.member)
    }
}
