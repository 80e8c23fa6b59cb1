//! Usage tables: which regions reference which members.

use std::collections::BTreeSet;
use std::path::PathBuf;

use nullsafe_core::errors::FactError;
use nullsafe_core::types::collections::FxHashMap;

use super::tsv;
use crate::model::Region;

const COLUMNS: usize = 5;

/// A region referencing `used_member` of `used_class`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    pub region: Region,
    pub used_member: String,
    pub used_class: String,
    pub source_type: String,
}

/// Usage records indexed by the class of the used member.
#[derive(Debug, Clone, Default)]
pub struct UsageTable {
    by_class: FxHashMap<String, Vec<UsageRecord>>,
    len: usize,
}

impl UsageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `file_name` from every directory; absent tables are skipped.
    /// Columns: region class, region member, used member, used class, source type.
    pub fn load(dirs: &[PathBuf], file_name: &str) -> Result<Self, FactError> {
        let mut table = Self::new();
        for dir in dirs {
            for row in tsv::read_optional_table(&dir.join(file_name), COLUMNS)? {
                table.push(UsageRecord {
                    region: Region::new(row.get(0), row.get(1)),
                    used_member: row.get(2).to_string(),
                    used_class: row.get(3).to_string(),
                    source_type: row.get(4).to_string(),
                });
            }
        }
        Ok(table)
    }

    pub fn push(&mut self, record: UsageRecord) {
        self.by_class
            .entry(record.used_class.clone())
            .or_default()
            .push(record);
        self.len += 1;
    }

    /// Regions referencing `member` of `class`.
    pub fn regions_using(&self, class: &str, member: &str) -> BTreeSet<Region> {
        self.records_for(class)
            .filter(|r| r.used_member == member)
            .map(|r| r.region.clone())
            .collect()
    }

    /// Regions referencing any of `members` of `class`.
    pub fn regions_using_any(&self, class: &str, members: &BTreeSet<String>) -> BTreeSet<Region> {
        self.records_for(class)
            .filter(|r| members.contains(&r.used_member))
            .map(|r| r.region.clone())
            .collect()
    }

    /// Regions referencing any member of `class`.
    pub fn regions_using_class(&self, class: &str) -> BTreeSet<Region> {
        self.records_for(class).map(|r| r.region.clone()).collect()
    }

    fn records_for<'a>(&'a self, class: &str) -> impl Iterator<Item = &'a UsageRecord> + 'a {
        self.by_class.get(class).into_iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
