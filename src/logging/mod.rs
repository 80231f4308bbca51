// Logging setup
//
// tracing-subscriber with an env filter. RUST_LOG wins when set; otherwise
// the crate and the HTTP trace layer log at info (debug with --verbose).

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "moodbot=info,tower_http=info";
const VERBOSE_FILTER: &str = "moodbot=debug,tower_http=debug";

/// Filter used when RUST_LOG is not set
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
