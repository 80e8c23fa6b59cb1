//! Candidate edits.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Location;

/// A proposed annotation on one location.
///
/// Equality, ordering and hashing consider only `location`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fix {
    pub location: Location,
    /// Source file declaring the location, when known.
    pub path: Option<PathBuf>,
    pub annotation: String,
    /// Why the candidate was proposed (usually the error kind).
    pub origin: String,
    /// Whether the location lives in the module under mutation.
    pub source_in_target: bool,
}

impl Fix {
    pub fn new(location: Location, annotation: impl Into<String>) -> Self {
        Self {
            location,
            path: None,
            annotation: annotation.into(),
            origin: String::new(),
            source_in_target: true,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_source_in_target(mut self, in_target: bool) -> Self {
        self.source_in_target = in_target;
        self
    }

    /// Returns a copy flagged as editable in the target module.
    pub fn in_target(&self) -> Self {
        let mut fix = self.clone();
        fix.source_in_target = true;
        fix
    }
}

impl PartialEq for Fix {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
    }
}

impl Eq for Fix {}

impl Hash for Fix {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location.hash(state);
    }
}

impl PartialOrd for Fix {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fix {
    fn cmp(&self, other: &Self) -> Ordering {
        self.location.cmp(&other.location)
    }
}
