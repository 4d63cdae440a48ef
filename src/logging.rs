//! Tracing subscriber setup
//!
//! `RUST_LOG`, when set, replaces the default filter entirely.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or empty
pub const DEFAULT_DIRECTIVE: &str = "prediction_tracker=warn";

/// Build the filter from a `RUST_LOG` value.
///
/// An unparsable value falls back to the default rather than silencing
/// everything.
pub fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber, writing to stderr so reports on stdout
/// stay clean.
pub fn init() {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(rust_log.as_deref()))
        .init();
}
