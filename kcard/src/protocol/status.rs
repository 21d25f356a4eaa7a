// kcard/src/protocol/status.rs

use crate::{Error, Result};

/// Outcome classified from the trailing two bytes (SW1, SW2) of a
/// response.
///
/// None of these are fatal on their own: callers pick the next strategy
/// (retry with a different length, stop a record scan, try another
/// command) and never abort the whole read from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusWord {
    /// 0x90 0x00
    Success,
    /// SW1 = 0x6C; SW2 carries the exact length the card expects on retry.
    WrongLength(u8),
    /// SW1 = 0x6A; terminates record-scan loops.
    NoMoreRecords,
    /// Anything else, with the raw pair preserved for logging.
    Other(u8, u8),
}

impl StatusWord {
    /// Classify a raw (SW1, SW2) pair.
    pub fn classify(sw1: u8, sw2: u8) -> Self {
        match (sw1, sw2) {
            (0x90, 0x00) => Self::Success,
            (0x6C, n) => Self::WrongLength(n),
            (0x6A, _) => Self::NoMoreRecords,
            (a, b) => Self::Other(a, b),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// SW1 of the classified pair; useful for the branches that only care
    /// about the first status byte (0x62 warnings on Hipass).
    pub fn sw1(&self) -> u8 {
        match *self {
            Self::Success => 0x90,
            Self::WrongLength(_) => 0x6C,
            Self::NoMoreRecords => 0x6A,
            Self::Other(a, _) => a,
        }
    }
}

/// Split a raw response into (payload, status word). A response shorter
/// than the two mandatory status bytes is a transport fault.
pub fn split_payload(response: &[u8]) -> Result<(&[u8], StatusWord)> {
    if response.len() < 2 {
        return Err(Error::TruncatedResponse {
            actual: response.len(),
        });
    }
    let (payload, sw) = response.split_at(response.len() - 2);
    Ok((payload, StatusWord::classify(sw[0], sw[1])))
}
