//! Tracing/logging initialization.
//!
//! The coordinator's audit trail is emitted through `tracing`: every public
//! marketplace call logs entry and exit with its parameters. Thread names
//! are enabled so those lines carry the producer/consumer identity.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). Filtering is
/// configurable via `RUST_LOG`; set `bazaar_market=debug` to see the full
/// audit trail.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_thread_names(true)
        .with_target(false)
        .try_init();
}
