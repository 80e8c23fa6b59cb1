//! `errors.tsv`: errors reported by the checker after each build.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use nullsafe_core::errors::FactError;

use super::fields::FieldRegistry;
use super::tsv::{self, Row};
use crate::model::{Fix, Location, Region, ReportedError};

const COLUMNS: usize = 12;

/// Reads every row of an errors table.
///
/// Field locations are widened to their whole declaration using `fields`, so
/// that errors on `int a, b;` resolved through `a` or `b` name one candidate.
pub fn read_errors(
    path: &Path,
    annotation: &str,
    fields: &FieldRegistry,
) -> Result<Vec<ReportedError>, FactError> {
    tsv::read_table(path, COLUMNS)?
        .iter()
        .map(|row| parse_row(row, path, annotation, fields))
        .collect()
}

fn parse_row(
    row: &Row,
    path: &Path,
    annotation: &str,
    fields: &FieldRegistry,
) -> Result<ReportedError, FactError> {
    let kind = row.get(0).to_string();
    let region = Region::new(row.get(2), row.get(3));
    let offset = row.optional(4).map(|_| row.parse::<u64>(4, path)).transpose()?;

    let mut resolving_fixes = BTreeSet::new();
    if let Some(location) = parse_location(row, path, fields)? {
        let mut fix = Fix::new(location, annotation).with_origin(kind.clone());
        if let Some(source) = row.optional(11) {
            fix = fix.with_path(tsv::uri_to_path(source));
        }
        resolving_fixes.insert(fix);
    }

    Ok(ReportedError {
        kind,
        message: row.get(1).to_string(),
        region,
        offset: offset.unwrap_or(0),
        path: row.optional(5).map(|p| PathBuf::from(tsv::uri_to_path(p))),
        resolving_fixes,
    })
}

fn parse_location(
    row: &Row,
    path: &Path,
    fields: &FieldRegistry,
) -> Result<Option<Location>, FactError> {
    let Some(kind) = row.optional(6) else {
        return Ok(None);
    };
    let malformed = |message: String| FactError::Malformed {
        path: path.display().to_string(),
        line: row.line,
        message,
    };
    let class = row
        .optional(7)
        .ok_or_else(|| malformed("location has no class".to_string()))?;

    let location = match kind {
        "METHOD" => Location::method(
            class,
            row.optional(8)
                .ok_or_else(|| malformed("method location has no method".to_string()))?,
        ),
        "PARAMETER" => Location::parameter(
            class,
            row.optional(8)
                .ok_or_else(|| malformed("parameter location has no method".to_string()))?,
            row.parse::<usize>(10, path)?,
        ),
        "FIELD" => {
            let variable = row
                .optional(9)
                .ok_or_else(|| malformed("field location has no variable".to_string()))?;
            fields.location_of(class, variable)
        }
        "CLASS" => Location::Class {
            class: class.to_string(),
        },
        other => return Err(malformed(format!("unknown location kind '{other}'"))),
    };
    Ok(Some(location))
}
