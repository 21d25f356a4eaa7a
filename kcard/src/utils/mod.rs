//! Utilities for kcard: small, reusable helpers used across the crate.
//!
//! Hex formatting for log lines and the fallback card number, plus the
//! per-exchange timeout policy.

pub mod hex;
pub mod timeout;

// Re-export the most common helpers at the `utils` module level so callers
// can use `crate::utils::bytes_to_hex(...)` etc if they prefer.
pub use hex::*;
pub use timeout::*;
