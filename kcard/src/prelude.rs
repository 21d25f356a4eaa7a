// kcard/src/prelude.rs

pub use crate::protocol::{Apdu, StatusWord};
pub use crate::reader::{read_card, Connected, Idle, SchemeDetected, Session};
pub use crate::scheme::{detect, Decoder, Detection};
pub use crate::transport::{MockTransceiver, Transceiver};
pub use crate::{
    CardId, CardReadResult, CardScheme, Error, Result, Transaction, TxKind,
};

// Re-export small utilities for convenience
pub use crate::utils::{
    bytes_to_hex, bytes_to_hex_spaced, bytes_to_hex_upper, default_exchange_timeout, ms,
    DEFAULT_EXCHANGE_TIMEOUT_MS,
};
