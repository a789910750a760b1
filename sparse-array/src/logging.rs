//! Tracing setup for binaries embedding the sparse array.
//!
//! The library only emits `tracing` events (target `sparse_array`); installing
//! a subscriber is left to the application.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize a tracing subscriber.
///
/// Reads `RUST_LOG` env var, falling back to `default_filter` if unset.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=sparse_array=debug cargo run -p sparse-probe -- --read 40
/// ```
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Ignore the error when a global subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
