//! `method_info.tsv`: method declarations and the override hierarchy.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use nullsafe_core::constants::TOP_METHOD_ID;
use nullsafe_core::errors::FactError;
use nullsafe_core::types::collections::{FxHashMap, FxHashSet, SmallVec4};

use super::tsv::{self, Row};
use crate::model::{names, Location, Region};

const COLUMNS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Package,
    Private,
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "protected" => Ok(Self::Protected),
            "package" | "default" => Ok(Self::Package),
            "private" => Ok(Self::Private),
            other => Err(format!("unknown visibility '{other}'")),
        }
    }
}

/// One declared method.
#[derive(Debug, Clone)]
pub struct MethodRecord {
    pub id: u32,
    pub class: String,
    pub signature: String,
    /// Id of the nearest overridden method, `TOP_METHOD_ID` if none.
    pub parent: u32,
    pub arity: usize,
    pub nullable_params: Vec<bool>,
    pub has_nullable_return: bool,
    pub visibility: Visibility,
    pub has_non_primitive_return: bool,
    pub path: Option<PathBuf>,
    /// Ids of methods that directly override this one.
    pub children: SmallVec4<u32>,
}

impl MethodRecord {
    pub fn new(id: u32, class: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            id,
            class: class.into(),
            signature: signature.into(),
            parent: TOP_METHOD_ID,
            arity: 0,
            nullable_params: Vec::new(),
            has_nullable_return: false,
            visibility: Visibility::Public,
            has_non_primitive_return: true,
            path: None,
            children: SmallVec4::new(),
        }
    }

    pub fn with_parent(mut self, parent: u32) -> Self {
        self.parent = parent;
        self
    }

    pub fn location(&self) -> Location {
        Location::method(&self.class, &self.signature)
    }

    pub fn region(&self) -> Region {
        Region::new(&self.class, &self.signature)
    }

    pub fn is_constructor(&self) -> bool {
        names::is_constructor(&self.class, &self.signature)
    }
}

/// Method declarations of one module, indexed for override queries.
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    records: FxHashMap<u32, MethodRecord>,
    by_signature: FxHashMap<(String, String), u32>,
    by_class: FxHashMap<String, Vec<u32>>,
    declared_classes: FxHashSet<String>,
    class_paths: FxHashMap<String, PathBuf>,
}

impl MethodRegistry {
    /// Builds the registry and links each record to its overriding children.
    pub fn from_records(records: impl IntoIterator<Item = MethodRecord>) -> Self {
        let mut registry = Self::default();
        for mut record in records {
            record.children.clear();
            registry
                .by_signature
                .insert((record.class.clone(), record.signature.clone()), record.id);
            registry
                .by_class
                .entry(record.class.clone())
                .or_default()
                .push(record.id);
            registry.declared_classes.insert(record.class.clone());
            if let Some(path) = &record.path {
                registry
                    .class_paths
                    .entry(record.class.clone())
                    .or_insert_with(|| path.clone());
            }
            registry.records.insert(record.id, record);
        }

        let mut links: Vec<(u32, u32)> = registry
            .records
            .values()
            .filter(|r| r.parent != TOP_METHOD_ID)
            .map(|r| (r.parent, r.id))
            .collect();
        links.sort_unstable();
        for (parent, child) in links {
            if let Some(record) = registry.records.get_mut(&parent) {
                record.children.push(child);
            }
        }
        for ids in registry.by_class.values_mut() {
            ids.sort_unstable();
        }
        registry
    }

    /// Loads `file_name` from every directory. Absent tables are skipped with
    /// a warning: coverage gaps degrade region lookups, not the run.
    pub fn load(dirs: &[PathBuf], file_name: &str) -> Result<Self, FactError> {
        let mut records = Vec::new();
        for dir in dirs {
            let path = dir.join(file_name);
            for row in tsv::read_optional_table(&path, COLUMNS)? {
                records.push(parse_row(&row, &path)?);
            }
        }
        Ok(Self::from_records(records))
    }

    pub fn get(&self, id: u32) -> Option<&MethodRecord> {
        self.records.get(&id)
    }

    pub fn find(&self, class: &str, signature: &str) -> Option<&MethodRecord> {
        self.by_signature
            .get(&(class.to_string(), signature.to_string()))
            .and_then(|id| self.records.get(id))
    }

    /// The nearest overridden method, if declared in this registry.
    pub fn closest_super_method(&self, class: &str, signature: &str) -> Option<&MethodRecord> {
        let record = self.find(class, signature)?;
        if record.parent == TOP_METHOD_ID {
            return None;
        }
        self.records.get(&record.parent)
    }

    /// Overriding methods, direct only or transitively.
    pub fn sub_methods(&self, class: &str, signature: &str, recursive: bool) -> Vec<&MethodRecord> {
        let Some(record) = self.find(class, signature) else {
            return Vec::new();
        };
        let mut result = Vec::new();
        let mut seen: FxHashSet<u32> = FxHashSet::default();
        let mut queue: VecDeque<u32> = record.children.iter().copied().collect();
        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(child) = self.records.get(&id) {
                result.push(child);
                if recursive {
                    queue.extend(child.children.iter().copied());
                }
            }
        }
        result
    }

    pub fn methods_of(&self, class: &str) -> Vec<&MethodRecord> {
        self.by_class
            .get(class)
            .map(|ids| ids.iter().filter_map(|id| self.records.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn constructors_of(&self, class: &str) -> Vec<&MethodRecord> {
        self.methods_of(class)
            .into_iter()
            .filter(|m| m.is_constructor())
            .collect()
    }

    /// Public methods returning a reference type, ordered by id.
    pub fn public_methods_with_non_primitive_return(&self) -> Vec<&MethodRecord> {
        let mut methods: Vec<&MethodRecord> = self
            .records
            .values()
            .filter(|m| {
                m.visibility == Visibility::Public && m.has_non_primitive_return && !m.is_constructor()
            })
            .collect();
        methods.sort_by_key(|m| m.id);
        methods
    }

    /// Whether the class of `location` is declared in this module.
    pub fn declares(&self, location: &Location) -> bool {
        self.declared_classes.contains(location.class())
    }

    pub fn path_of_class(&self, class: &str) -> Option<&Path> {
        self.class_paths.get(class).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_row(row: &Row, path: &Path) -> Result<MethodRecord, FactError> {
    let visibility = row.get(7).parse::<Visibility>().map_err(|message| FactError::Malformed {
        path: path.display().to_string(),
        line: row.line,
        message,
    })?;
    let flags = row
        .get(5)
        .trim_matches(|c| c == '[' || c == ']')
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(|f| f.eq_ignore_ascii_case("true"))
        .collect();
    Ok(MethodRecord {
        id: row.parse::<u32>(0, path)?,
        class: row.get(1).to_string(),
        signature: row.get(2).to_string(),
        parent: row.parse::<u32>(3, path)?,
        arity: row.parse::<usize>(4, path)?,
        nullable_params: flags,
        has_nullable_return: row.parse::<bool>(6, path)?,
        visibility,
        has_non_primitive_return: row.parse::<bool>(8, path)?,
        path: row.optional(9).map(|p| PathBuf::from(tsv::uri_to_path(p))),
        children: SmallVec4::new(),
    })
}
