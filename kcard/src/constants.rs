// kcard/src/constants.rs
//! Wire-level constants shared with the physical cards.
//!
//! These values are external contracts: AID byte strings, instruction bytes
//! and status words must be reproduced bit-exact for the cards to answer.

/// T-money application AID.
pub const AID_TMONEY: [u8; 7] = [0xD4, 0x10, 0x00, 0x00, 0x03, 0x00, 0x01];

/// KFTC root AID shared by the Hipass and EZL application families.
pub const AID_KFTC: [u8; 7] = [0xA0, 0x00, 0x00, 0x04, 0x52, 0x00, 0x01];

/// Alternate EZL AID answered by some card batches.
pub const AID_EZL_ALT1: [u8; 7] = [0xD4, 0x10, 0x00, 0x00, 0x03, 0x00, 0x05];
/// Second alternate EZL AID.
pub const AID_EZL_ALT2: [u8; 7] = [0xD4, 0x10, 0x00, 0x00, 0x03, 0x00, 0x06];

/// Rail+ application AID.
pub const AID_RAILPLUS: [u8; 7] = [0xD4, 0x10, 0x00, 0x00, 0x07, 0x00, 0x01];

/// Nested AID advertised in the KFTC FCI by Hipass cards.
pub const AID_HIPASS_IN_FCI: [u8; 7] = [0xA0, 0x00, 0x00, 0x02, 0x45, 0x00, 0x01];
/// Nested AID advertised in the KFTC FCI by EZL cards; also the EZL
/// secondary application selected before balance/history commands.
pub const AID_EZL_IN_FCI: [u8; 7] = [0xD4, 0x10, 0x00, 0x00, 0x14, 0x00, 0x01];

/// ISO 7816 interindustry class byte.
pub const CLA_ISO: u8 = 0x00;
/// Vendor-proprietary class byte used by the Korean purse commands.
pub const CLA_PROPRIETARY: u8 = 0x90;

/// SELECT (by AID) instruction.
pub const INS_SELECT: u8 = 0xA4;
/// READ RECORD instruction.
pub const INS_READ_RECORD: u8 = 0xB2;
/// READ BINARY instruction (Hipass card-number file).
pub const INS_READ_BINARY: u8 = 0xB0;
/// Proprietary GET BALANCE (T-money / EZL / Rail+).
pub const INS_GET_BALANCE: u8 = 0x4C;
/// Proprietary GET BALANCE used by Hipass.
pub const INS_GET_BALANCE_HIPASS: u8 = 0x5C;
/// Proprietary GET DATA (Rail+ card-number fallback).
pub const INS_GET_DATA: u8 = 0x4A;
/// Proprietary transaction-record read (Rail+ primary history path).
pub const INS_GET_TRANSACTION: u8 = 0x4E;

/// FCI template tag returned by SELECT.
pub const TAG_FCI_TEMPLATE: u8 = 0x6F;
/// AID tag nested inside an FCI template.
pub const TAG_AID: u8 = 0x4F;
/// Application PAN tag used inside Hipass FCIs.
pub const TAG_PAN_HIPASS: u8 = 0x13;
/// EMV-style PAN tag searched on Rail+ payloads.
pub const TAG_PAN: u8 = 0x5A;
/// Track2-equivalent tag searched on Rail+ payloads.
pub const TAG_TRACK2: u8 = 0x57;

/// Upper bound (won) accepted for amounts and balances; larger values mark
/// a misparsed record.
pub const MAX_AMOUNT: u32 = 500_000;
