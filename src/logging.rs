//! Logging configuration.
//!
//! Logs go to stderr so stdout carries only the query report.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Initializes stderr logging.
///
/// `RUST_LOG` overrides the default `info` level (e.g. `RUST_LOG=debug`
/// shows every filter document sent to the server).
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the env filter from an optional directive string, falling back to
/// the default level when the directive is missing or invalid.
pub fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
