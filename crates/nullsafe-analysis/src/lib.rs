//! # nullsafe-analysis
//!
//! Build-and-measure engine for nullability annotation inference.
//!
//! Candidate annotations are grouped into trees, trees that touch disjoint
//! code regions are batched into a single rebuild, and every tree is grown
//! with the candidates that resolve the errors it triggers until it reaches
//! a fixpoint or the depth bound. The outer [`annotator::Annotator`] loop
//! injects the approved trees and repeats until no new candidate appears.

pub mod analysis_mode;
pub mod annotator;
pub mod build;
pub mod cache;
pub mod evaluator;
pub mod facts;
pub mod graph;
pub mod inject;
pub mod model;
pub mod output;
pub mod processor;
pub mod region;
pub mod report_cache;
pub mod run_log;

pub use analysis_mode::AnalysisMode;
pub use annotator::{AnnotationOutcome, Annotator, DownstreamSetup};
pub use report_cache::ReportCache;
pub use run_log::{RunLog, RunSummary};
