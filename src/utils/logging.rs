//! Diagnostic logging setup.
//!
//! Reports go to stdout, so all diagnostics are written to stderr. Command
//! progress is printed directly; library events (line counts, cache
//! reads and writes, aggregation sizes) show up with `RUST_LOG=info` or
//! `RUST_LOG=debug`.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. Level comes from `RUST_LOG`, defaulting
/// to `warn`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
