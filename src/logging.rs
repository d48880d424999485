//! Tracing subscriber setup.
//!
//! The library only emits `tracing` events; binaries and tests pick the
//! subscriber. `RUST_LOG` always wins over the computed level.

use tracing_subscriber::EnvFilter;

/// Maps a `-v` count onto a level, starting from the configured default
pub fn level_for_verbosity(default_level: &str, verbose: u8) -> &str {
    match verbose {
        0 => default_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Installs a stderr `fmt` subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Subscriber writing through the test harness, for `#[test]` bodies
#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
