//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter, e.g. `QUALITY_GATE_LOG=quality_gate=debug`.
pub const LOG_ENV: &str = "QUALITY_GATE_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber. Logs go to stderr so `--json` stdout stays clean.
///
/// Falls back to `quality_gate=warn` if the variable is unset or invalid.
/// Safe to call more than once.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("quality_gate=warn"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .try_init();
    });
}
