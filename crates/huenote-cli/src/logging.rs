//! Tracing subscriber setup.
//!
//! Logs go to stderr so `--json` output on stdout stays parseable.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::constants::env_vars;

/// Install the global subscriber.
///
/// Precedence: `HUENOTE_LOG`, then `--verbose`, then the config's
/// `[log] level`, then `warn`.
pub fn init(verbose: bool, config_level: Option<&str>) {
    let fallback = if verbose {
        "debug"
    } else {
        config_level.unwrap_or("warn")
    };
    let filter = EnvFilter::try_from_env(env_vars::LOG)
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (e.g. in tests) is harmless.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init();
}
