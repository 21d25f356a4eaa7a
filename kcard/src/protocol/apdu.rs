// kcard/src/protocol/apdu.rs

use crate::constants;

/// Immutable command APDU. Built once, sent as raw bytes.
///
/// Only the command shapes the Korean transit cards actually answer are
/// provided; everything is a 5-byte header with an optional Lc-prefixed
/// data field and a trailing Le byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apdu(Vec<u8>);

impl Apdu {
    /// SELECT (by AID): `00 A4 04 00 <Lc> <AID...> 00`.
    pub fn select_aid(aid: &[u8]) -> Self {
        let mut buf = Vec::with_capacity(6 + aid.len());
        buf.push(constants::CLA_ISO);
        buf.push(constants::INS_SELECT);
        buf.push(0x04); // P1: select by DF name
        buf.push(0x00); // P2
        buf.push(aid.len() as u8);
        buf.extend_from_slice(aid);
        buf.push(0x00); // Le
        Self(buf)
    }

    /// READ RECORD: `00 B2 <record> <p2> <le>`. The P2 byte carries the
    /// SFI reference as the cards expect it.
    pub fn read_record(record: u8, p2: u8, le: u8) -> Self {
        Self(vec![
            constants::CLA_ISO,
            constants::INS_READ_RECORD,
            record,
            p2,
            le,
        ])
    }

    /// READ BINARY: `00 B0 <p1> <p2> <le>`.
    pub fn read_binary(p1: u8, p2: u8, le: u8) -> Self {
        Self(vec![
            constants::CLA_ISO,
            constants::INS_READ_BINARY,
            p1,
            p2,
            le,
        ])
    }

    /// Vendor-proprietary 5-byte header command (class 0x90 purse
    /// commands).
    pub fn proprietary(ins: u8, p1: u8, p2: u8, le: u8) -> Self {
        Self(vec![constants::CLA_PROPRIETARY, ins, p1, p2, le])
    }

    /// Copy of this command with the trailing Le byte replaced; used for
    /// the wrong-length retry where the card dictates the exact length.
    pub fn with_le(&self, le: u8) -> Self {
        let mut buf = self.0.clone();
        if let Some(last) = buf.last_mut() {
            *last = le;
        }
        Self(buf)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
