//! # nullsafe-core
//!
//! Shared foundation for the nullsafe annotation engine: errors, layered
//! configuration, synchronous events, tracing setup, and constants.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;
