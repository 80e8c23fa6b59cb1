//! Observability for nullsafe: `tracing` with an `EnvFilter` read from
//! `NULLSAFE_LOG`, and shared metric field names.

pub mod metrics;
pub mod setup;

pub use setup::{init_tracing, init_tracing_with_filter};
