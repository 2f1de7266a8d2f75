//! Logging setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging to stderr.
///
/// `RUST_LOG` overrides the level derived from `verbosity`
/// (0 = warn, 1 = info, 2 = debug, 3+ = trace).
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
