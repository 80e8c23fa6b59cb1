//! `reports.json` and `log.json` writers.

use std::path::Path;

use nullsafe_core::constants::{LOG_FILE, REPORTS_FILE};
use nullsafe_core::errors::AnnotatorError;
use serde::Serialize;

use crate::analysis_mode::AnalysisMode;
use crate::evaluator::Report;
use crate::inject::{ChangeAction, ChangeRecord};
use crate::run_log::RunSummary;

/// Whether a report carries a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Measured,
    /// Never rebuilt with the root applied, for example at depth 0.
    Unresolved,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub root: ChangeRecord,
    pub local_effect: i64,
    pub overall_effect: i64,
    pub upper_bound_effect_on_downstream: i64,
    pub lower_bound_effect_on_downstream: i64,
    pub finished: bool,
    pub resolution: Resolution,
    pub approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<Vec<ChangeRecord>>,
}

impl ReportEntry {
    pub fn new(report: &Report, mode: AnalysisMode, chain: bool) -> Self {
        let tree = (chain && report.local_effect < 1).then(|| {
            report
                .tree
                .iter()
                .map(|fix| ChangeRecord::new(ChangeAction::Add, fix))
                .collect()
        });
        Self {
            root: ChangeRecord::new(ChangeAction::Add, &report.root),
            local_effect: report.local_effect,
            overall_effect: mode.overall_effect(report),
            upper_bound_effect_on_downstream: report.upper_bound,
            lower_bound_effect_on_downstream: report.lower_bound,
            finished: report.finished,
            resolution: if report.processed {
                Resolution::Measured
            } else {
                Resolution::Unresolved
            },
            approved: report.approved(),
            tree,
        }
    }
}

/// Entries ordered by overall effect, highest first. Ties keep root order.
pub fn report_entries<'a>(
    reports: impl IntoIterator<Item = &'a Report>,
    mode: AnalysisMode,
    chain: bool,
) -> Vec<ReportEntry> {
    let mut entries: Vec<ReportEntry> = reports
        .into_iter()
        .map(|r| ReportEntry::new(r, mode, chain))
        .collect();
    entries.sort_by(|a, b| b.overall_effect.cmp(&a.overall_effect));
    entries
}

pub fn write_reports(dir: &Path, entries: &[ReportEntry]) -> Result<(), AnnotatorError> {
    write_json(dir, REPORTS_FILE, entries)
}

pub fn write_log(dir: &Path, summary: &RunSummary) -> Result<(), AnnotatorError> {
    write_json(dir, LOG_FILE, summary)
}

fn write_json<T: Serialize + ?Sized>(dir: &Path, file: &str, value: &T) -> Result<(), AnnotatorError> {
    let path = dir.join(file);
    let output_error = |message: String| AnnotatorError::Output {
        path: path.display().to_string(),
        message,
    };
    let json = serde_json::to_string_pretty(value).map_err(|e| output_error(e.to_string()))?;
    std::fs::create_dir_all(dir)
        .and_then(|_| std::fs::write(&path, json))
        .map_err(|e| output_error(e.to_string()))?;
    tracing::info!(path = %path.display(), "wrote output");
    Ok(())
}
