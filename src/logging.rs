//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

use crate::Config;

/// Initialize tracing for the process.
///
/// `RUST_LOG` takes precedence over the configured level. Safe to call more
/// than once; later calls are no-ops.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let _ = if config.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
