//! Diagnostic output for the CLI.

use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "warn";

/// Install a `tracing` fmt subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG`. Library crates log through the `log`
/// facade, which the subscriber bridges.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    // A second call finds a subscriber already installed; keep the first.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
