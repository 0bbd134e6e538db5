//! Process-wide logging setup for binaries and tests that embed the reconciler.

/// Initialize tracing with defaults (JSON, `RUST_LOG` or `info`).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&tracing::LogConfig::default());
}

/// Tracing configuration (filters, output format).
pub mod tracing;
