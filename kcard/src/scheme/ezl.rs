// kcard/src/scheme/ezl.rs

use log::{debug, warn};

use crate::constants::{AID_EZL_IN_FCI, INS_GET_BALANCE, TAG_FCI_TEMPLATE};
use crate::protocol::fields;
use crate::protocol::{split_payload, Apdu, StatusWord};
use crate::scheme::record::{self, RecordScan};
use crate::transport::Transceiver;
use crate::types::{CardId, Transaction, TxKind};
use crate::utils::DEFAULT_EXCHANGE_TIMEOUT_MS;

/// SFI 4 reference byte for READ RECORD.
const P2_BALANCE_RECORD: u8 = 0x24;
/// 26-byte transaction records.
const LE_RECORD: u8 = 0x1A;
const MAX_RECORDS: u8 = 10;

/// EZL decoder. The secondary application must be selected before the
/// balance and history commands answer; its FCI also carries the card
/// number.
#[derive(Debug, Default)]
pub struct Ezl {
    secondary_fci: Option<Vec<u8>>,
}

impl Ezl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the EZL secondary application and keep its FCI for the
    /// card-number extraction. Failure is non-fatal; the decoder proceeds
    /// best-effort.
    pub fn select_secondary(&mut self, transceiver: &mut dyn Transceiver) -> bool {
        let apdu = Apdu::select_aid(&AID_EZL_IN_FCI);
        let response = match transceiver.exchange(apdu.as_bytes(), DEFAULT_EXCHANGE_TIMEOUT_MS) {
            Ok(response) => response,
            Err(err) => {
                debug!("secondary AID exchange failed: {}", err);
                return false;
            }
        };
        match split_payload(&response) {
            Ok((payload, StatusWord::Success)) => {
                self.secondary_fci = Some(payload.to_vec());
                true
            }
            _ => {
                warn!("secondary AID selection failed");
                false
            }
        }
    }

    pub fn read_balance(&self, transceiver: &mut dyn Transceiver) -> u32 {
        super::read_balance_be32(transceiver, &Apdu::proprietary(INS_GET_BALANCE, 0x00, 0x00, 0x04))
    }

    /// The card number lives at offset 8 of the secondary-select FCI.
    pub fn read_card_number(&self, _transceiver: &mut dyn Transceiver, card_id: &CardId) -> String {
        let from_fci = self.secondary_fci.as_deref().and_then(|payload| {
            if payload.len() < 16 || payload[0] != TAG_FCI_TEMPLATE {
                return None;
            }
            let number = fields::bcd_card_number(payload, 8, 8)?;
            fields::is_valid_card_number(&number).then_some(number)
        });
        match from_fci {
            Some(number) => number,
            None => {
                warn!("card number not found, using hardware id");
                card_id.to_hex()
            }
        }
    }

    pub fn read_history(&self, transceiver: &mut dyn Transceiver) -> Vec<Transaction> {
        let params = RecordScan {
            p2: P2_BALANCE_RECORD,
            le: LE_RECORD,
            max_records: MAX_RECORDS,
            empty_prefix: 16,
        };
        record::scan(transceiver, &params, Self::parse_record)
    }

    /// Same purse layout as T-money: type at 0, balance BE u16 at 4,
    /// amount BE u16 at 12; out-of-range values mark a misparsed record.
    fn parse_record(payload: &[u8]) -> Option<Transaction> {
        if payload.len() < 18 {
            return None;
        }
        let kind_code = payload[0];
        let balance = fields::be_u16(payload, 4)? as u32;
        let amount = fields::be_u16(payload, 12)? as u32;
        if !fields::is_valid_amount(amount) || !fields::is_valid_amount(balance) {
            return None;
        }

        let (kind, location) = if kind_code == 0x02 {
            (TxKind::Charge, "충전")
        } else {
            (TxKind::Use, "사용")
        };
        Some(Transaction::new(kind, None, location, amount, balance))
    }
}
