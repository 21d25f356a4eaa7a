// kcard/src/transport/traits.rs

use crate::Result;

/// Transceiver trait abstracts the contactless channel away from the
/// decoding logic. Implementations own the physical transport (NFC
/// controller, PC/SC, ...); this crate only sends command bytes and reads
/// response bytes.
///
/// All calls are blocking; no two commands are ever in flight against one
/// card.
pub trait Transceiver {
    /// Establish the card connection. Called once per session before the
    /// first `exchange`.
    fn connect(&mut self) -> Result<()>;

    /// Send a command APDU and return the raw response bytes, with a
    /// timeout in milliseconds. Exceeding the timeout is a transport
    /// error, not a protocol error.
    fn exchange(&mut self, command: &[u8], timeout_ms: u64) -> Result<Vec<u8>>;

    /// Release the card connection. Sessions treat close failures as
    /// non-fatal.
    fn close(&mut self) -> Result<()>;
}
