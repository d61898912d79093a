//! Logging setup for the suite binary.
//!
//! Structured logging via the `tracing` ecosystem. There are no CLI flags;
//! the `RUST_LOG` environment variable overrides the default filter.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Called once at startup, before any logging occurs. Defaults to info
/// level for the suite and harness crates.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("modal_suite=info,modal_harness=info"));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
