//! Tracing configuration for AbbrBoard
//!
//! Structured logging over `tracing-subscriber`. `RUST_LOG` overrides the
//! defaults; without it the app logs at info with debug detail for the
//! workspace crates.

use tracing_subscriber::EnvFilter;

/// Build the default filter directives for tracing
fn build_filter_directives() -> String {
    [
        "info",
        "abbrboard=debug",
        "ab_app=debug",
        "ab_infra=debug",
    ]
    .join(",")
}

/// Initialize the tracing subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(build_filter_directives()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
