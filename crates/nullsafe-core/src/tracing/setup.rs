//! Global subscriber installation for binaries and test harnesses that
//! embed the engine. The library crates only emit events.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding an `EnvFilter` directive string, e.g.
/// `NULLSAFE_LOG=nullsafe_analysis::processor=debug,nullsafe_core=warn`.
pub const LOG_ENV: &str = "NULLSAFE_LOG";

/// Filter used when `NULLSAFE_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "nullsafe_core=info,nullsafe_analysis=info";

/// Installs the fmt subscriber with `DEFAULT_FILTER` as the fallback.
pub fn init_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Installs the fmt subscriber. `NULLSAFE_LOG` takes precedence over
/// `fallback`; an invalid fallback degrades to `warn`.
///
/// Returns `false` if a global subscriber was already set, in which case
/// the existing one is kept.
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init()
        .is_ok()
}
