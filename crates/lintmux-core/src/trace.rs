//! Tracing setup.

use tracing_subscriber::EnvFilter;

/// Install a global subscriber filtered by the `LINTMUX_LOG` environment
/// variable (default `warn`). Safe to call more than once; later calls are
/// no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_env("LINTMUX_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
