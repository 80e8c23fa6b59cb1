//! Tests for subscriber installation.

use std::sync::Mutex;

use nullsafe_core::tracing::setup::{init_tracing, init_tracing_with_filter, LOG_ENV};

/// Serializes tests that touch `NULLSAFE_LOG` and the global subscriber.
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

// All tests share one process, so only the first installation can succeed.
// Each test therefore checks that repeated calls are harmless, not which
// call won.

#[test]
fn test_repeated_initialization_keeps_first_subscriber() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    assert!(!init_tracing());
    assert!(!init_tracing_with_filter("nullsafe_analysis=debug"));
}

#[test]
fn test_env_filter_with_per_module_levels() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV, "nullsafe_analysis::processor=debug,nullsafe_core=warn");
    init_tracing();
    tracing::debug!(target: "nullsafe_analysis::processor", "filtered event");
    std::env::remove_var(LOG_ENV);
}

#[test]
fn test_invalid_filters_fall_back() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV, "=:not a filter[");
    init_tracing_with_filter("also[not=valid");
    std::env::remove_var(LOG_ENV);
}
