//! Logger setup for the command-line tool.

use log::LevelFilter;

/// Install the `env_logger` backend.
///
/// Logs go to stderr at `info`, or `debug` when `verbose` is set, so that
/// reports on stdout stay machine-readable. `RUST_LOG` overrides both.
/// Calling this more than once is harmless.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .try_init();
}
