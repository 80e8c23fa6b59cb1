//! Source locations a candidate can target.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The element a candidate annotation is attached to.
///
/// Location equality is candidate identity: two candidates with the same
/// location are the same candidate, whatever their origin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Location {
    /// Method return type.
    Method { class: String, method: String },
    /// Parameter at `index` of `method`.
    Parameter {
        class: String,
        method: String,
        index: usize,
    },
    /// A field declaration; multi-variable declarations share one location.
    Field {
        class: String,
        variables: BTreeSet<String>,
    },
    /// A class-level annotation.
    Class { class: String },
}

impl Location {
    pub fn method(class: impl Into<String>, method: impl Into<String>) -> Self {
        Self::Method {
            class: class.into(),
            method: method.into(),
        }
    }

    pub fn parameter(class: impl Into<String>, method: impl Into<String>, index: usize) -> Self {
        Self::Parameter {
            class: class.into(),
            method: method.into(),
            index,
        }
    }

    pub fn field<I, S>(class: impl Into<String>, variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Field {
            class: class.into(),
            variables: variables.into_iter().map(Into::into).collect(),
        }
    }

    /// Enclosing class of the target element.
    pub fn class(&self) -> &str {
        match self {
            Self::Method { class, .. }
            | Self::Parameter { class, .. }
            | Self::Field { class, .. }
            | Self::Class { class } => class,
        }
    }

    /// Method signature for method and parameter locations.
    pub fn enclosing_method(&self) -> Option<&str> {
        match self {
            Self::Method { method, .. } | Self::Parameter { method, .. } => Some(method),
            _ => None,
        }
    }

    pub fn is_method(&self) -> bool {
        matches!(self, Self::Method { .. })
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self, Self::Parameter { .. })
    }

    pub fn is_field(&self) -> bool {
        matches!(self, Self::Field { .. })
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Method { .. } => "METHOD",
            Self::Parameter { .. } => "PARAMETER",
            Self::Field { .. } => "FIELD",
            Self::Class { .. } => "CLASS",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method { class, method } => write!(f, "{class}#{method}"),
            Self::Parameter {
                class,
                method,
                index,
            } => write!(f, "{class}#{method}[{index}]"),
            Self::Field { class, variables } => {
                let names: Vec<&str> = variables.iter().map(String::as_str).collect();
                write!(f, "{class}#{{{}}}", names.join(","))
            }
            Self::Class { class } => write!(f, "{class}"),
        }
    }
}
