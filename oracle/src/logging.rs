//! Development-time tracing for debugging the oracle.
//!
//! Diagnostics go to stderr so stdout stays limited to command output
//! (outboxes, check results) that scripts consume.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_DIRECTIVE: &str = "warn";

/// Filter used by `--verbose`: registry and generation events from this crate.
const VERBOSE_DIRECTIVE: &str = "warn,oracle=debug";

/// Initialize tracing subscriber for development logging.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` selects between `warn` and
/// crate-level `debug`. Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=oracle=trace cargo run -- generate 14 3 5 2 8
/// cargo run -- --verbose verify
/// ```
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn fallback_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    }
}
