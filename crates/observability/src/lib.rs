//! Tracing, logging, and request correlation (shared setup).

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(config: &LogConfig) {
    tracing::init(config);
}

/// Request correlation ids.
pub mod correlation;

/// Logging configuration.
pub mod logging;

/// Tracing subscriber setup (filters, layers).
pub mod tracing;

pub use correlation::{RequestId, REQUEST_ID_HEADER};
pub use logging::{LogConfig, LogFormat, ParseLogFormatError};
