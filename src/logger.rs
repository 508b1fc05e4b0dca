//! Logging setup for applications embedding this crate.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// The filter is taken from `RUST_LOG` when set; otherwise `default_level`
/// is applied to the given target (typically the binary name).
pub fn setup_logger(name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{name}={default_level}")));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
