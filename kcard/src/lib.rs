// kcard/src/lib.rs

//! kcard
//!
//! Pure Rust decoder for Korean transit smart cards.
//!
//! Detects the card scheme (T-money, EZL, Hipass, Rail+) by AID
//! trial-selection over a caller-supplied [`transport::Transceiver`] and
//! decodes balance, card number and transaction history from the
//! vendor-specific record formats.
#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod reader;
pub mod scheme;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the types in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
