// kcard/src/scheme/tmoney.rs

use log::warn;

use crate::constants::{INS_GET_BALANCE, TAG_FCI_TEMPLATE};
use crate::protocol::fields;
use crate::protocol::{split_payload, Apdu};
use crate::scheme::record::{self, RecordScan};
use crate::transport::Transceiver;
use crate::types::{CardId, Transaction, TxKind};
use crate::utils::DEFAULT_EXCHANGE_TIMEOUT_MS;

/// SFI 4 reference byte for READ RECORD.
const P2_BALANCE_RECORD: u8 = 0x24;
/// 46-byte transaction records.
const LE_RECORD: u8 = 0x2E;
const MAX_RECORDS: u8 = 20;

/// T-money decoder. No secondary application; card number comes from the
/// CARDINFO record, history from SFI 4.
#[derive(Debug, Default)]
pub struct TMoney;

impl TMoney {
    pub fn new() -> Self {
        Self
    }

    /// T-money needs no secondary application selection.
    pub fn select_secondary(&mut self, _transceiver: &mut dyn Transceiver) -> bool {
        true
    }

    pub fn read_balance(&self, transceiver: &mut dyn Transceiver) -> u32 {
        super::read_balance_be32(transceiver, &Apdu::proprietary(INS_GET_BALANCE, 0x00, 0x00, 0x04))
    }

    pub fn read_card_number(&self, transceiver: &mut dyn Transceiver, card_id: &CardId) -> String {
        match self.card_number_from_cardinfo(transceiver) {
            Some(number) => number,
            None => {
                warn!("card number not found, using hardware id");
                card_id.to_hex()
            }
        }
    }

    /// CARDINFO: READ RECORD SFI 2, record 1, Le 51. The card answers with
    /// an FCI template carrying the BCD card number at offset 8.
    fn card_number_from_cardinfo(&self, transceiver: &mut dyn Transceiver) -> Option<String> {
        let apdu = Apdu::read_record(0x01, 0x14, 0x33);
        let response = transceiver
            .exchange(apdu.as_bytes(), DEFAULT_EXCHANGE_TIMEOUT_MS)
            .ok()?;
        let (payload, _sw) = split_payload(&response).ok()?;

        if payload.len() < 16 || payload[0] != TAG_FCI_TEMPLATE {
            return None;
        }
        let number = fields::bcd_card_number(payload, 8, 8)?;
        fields::is_valid_card_number(&number).then_some(number)
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

    /// SFI 4 record layout: type at 0 (0x02 = charge, else use), balance
    /// BE u16 at 4, amount BE u16 at 12. No on-card date.
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
