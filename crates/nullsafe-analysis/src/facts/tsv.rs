//! Tab-separated fact table reading.

use std::path::Path;

use nullsafe_core::constants::NULL_FIELD;
use nullsafe_core::errors::FactError;

/// One data row with its 1-based line number.
#[derive(Debug, Clone)]
pub struct Row {
    pub line: usize,
    pub columns: Vec<String>,
}

impl Row {
    /// Column `idx`, or `None` for the `null` placeholder and blanks.
    pub fn optional(&self, idx: usize) -> Option<&str> {
        self.columns
            .get(idx)
            .map(String::as_str)
            .filter(|v| !v.is_empty() && *v != NULL_FIELD)
    }

    pub fn get(&self, idx: usize) -> &str {
        self.columns.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn parse<T: std::str::FromStr>(&self, idx: usize, path: &Path) -> Result<T, FactError> {
        self.get(idx).trim().parse::<T>().map_err(|_| FactError::Malformed {
            path: path.display().to_string(),
            line: self.line,
            message: format!("column {} is not a valid value: '{}'", idx + 1, self.get(idx)),
        })
    }
}

/// Read a table with a header row and exactly `columns` columns per row.
/// Blank lines are skipped.
pub fn read_table(path: &Path, columns: usize) -> Result<Vec<Row>, FactError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FactError::MissingFile {
                path: path.display().to_string(),
            }
        } else {
            FactError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        }
    })?;

    let mut rows = Vec::new();
    for (idx, line) in content.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<String> = line.split('\t').map(str::to_string).collect();
        if fields.len() != columns {
            return Err(FactError::Malformed {
                path: path.display().to_string(),
                line: idx + 1,
                message: format!("expected {columns} columns, found {}", fields.len()),
            });
        }
        rows.push(Row {
            line: idx + 1,
            columns: fields,
        });
    }
    Ok(rows)
}

/// Like `read_table`, but a missing file yields no rows and a warning.
pub fn read_optional_table(path: &Path, columns: usize) -> Result<Vec<Row>, FactError> {
    match read_table(path, columns) {
        Err(FactError::MissingFile { path }) => {
            tracing::warn!(%path, "fact table not found, continuing without it");
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Strips a `file:` URI scheme.
pub fn uri_to_path(uri: &str) -> &str {
    uri.strip_prefix("file://")
        .or_else(|| uri.strip_prefix("file:"))
        .unwrap_or(uri)
}
