//! Change records handed to the source editor and written to reports.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::{Fix, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Add,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub action: ChangeAction,
    pub annotation: String,
    pub path: Option<PathBuf>,
    pub location: Location,
    pub origin: String,
}

impl ChangeRecord {
    pub fn new(action: ChangeAction, fix: &Fix) -> Self {
        Self {
            action,
            annotation: fix.annotation.clone(),
            path: fix.path.clone(),
            location: fix.location.clone(),
            origin: fix.origin.clone(),
        }
    }
}
