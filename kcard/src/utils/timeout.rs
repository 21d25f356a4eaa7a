//! Timeout helpers used across the crate.
//!
//! Keep these helpers minimal: they centralize the per-exchange timeout
//! policy and provide a small conversion helper so tests and code can
//! express timeouts in milliseconds clearly.

use std::time::Duration;

/// Default per-exchange timeout in milliseconds. Exceeding it is a
/// transport error, not a protocol error.
pub const DEFAULT_EXCHANGE_TIMEOUT_MS: u64 = 2000;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Convenience: default exchange timeout as Duration.
pub fn default_exchange_timeout() -> Duration {
    ms(DEFAULT_EXCHANGE_TIMEOUT_MS)
}
