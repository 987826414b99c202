//! Log output for the command line host
//!
//! Logs go to stderr so a summary on stdout stays clean. `RUST_LOG` wins over
//! the default level when set.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber
///
/// `verbose` lowers the default level from `info` to `debug`. Calling this
/// twice is harmless; the second install is ignored.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
