// kcard/src/scheme/railplus.rs

use log::{debug, info, warn};

use crate::constants::{
    INS_GET_BALANCE, INS_GET_DATA, INS_GET_TRANSACTION, TAG_FCI_TEMPLATE, TAG_PAN, TAG_TRACK2,
};
use crate::protocol::fields;
use crate::protocol::{split_payload, Apdu, StatusWord};
use crate::scheme::record::{self, RecordScan};
use crate::transport::Transceiver;
use crate::types::{CardId, Transaction, TxKind};
use crate::utils::DEFAULT_EXCHANGE_TIMEOUT_MS;

/// SFI 3 reference byte (transaction records).
const P2_TRANS_RECORD: u8 = 0x1C;
/// SFI 4 reference byte (purse records, T-money compatible).
const P2_BALANCE_RECORD: u8 = 0x24;
/// 46-byte records on both files.
const LE_RECORD: u8 = 0x2E;
const MAX_RECORDS: u8 = 10;

/// One field-offset hypothesis for a Rail+ transaction record. Which
/// layout a given card batch writes could not be determined, so each
/// hypothesis is an explicit, independently testable decode attempt.
#[derive(Debug, Clone, Copy)]
struct RecordLayout {
    kind_at: usize,
    date_at: usize,
    amount_at: usize,
    balance_at: usize,
}

const LAYOUTS: [RecordLayout; 2] = [
    RecordLayout {
        kind_at: 0,
        date_at: 1,
        amount_at: 5,
        balance_at: 9,
    },
    // legacy overlap: date first, type after it, amounts unchanged
    RecordLayout {
        kind_at: 4,
        date_at: 0,
        amount_at: 5,
        balance_at: 9,
    },
];

/// Rail+ decoder. T-money compatible purse commands, but with the most
/// fallback paths of the family: three history strategies and a
/// card-number search ladder over FCI, TLV tags and raw BCD runs.
#[derive(Debug, Default)]
pub struct RailPlus;

impl RailPlus {
    pub fn new() -> Self {
        Self
    }

    /// Rail+ needs no secondary application selection.
    pub fn select_secondary(&mut self, _transceiver: &mut dyn Transceiver) -> bool {
        true
    }

    pub fn read_balance(&self, transceiver: &mut dyn Transceiver) -> u32 {
        super::read_balance_be32(transceiver, &Apdu::proprietary(INS_GET_BALANCE, 0x00, 0x00, 0x04))
    }

    pub fn read_card_number(&self, transceiver: &mut dyn Transceiver, card_id: &CardId) -> String {
        // CARDINFO record first, then the proprietary GET DATA
        let cardinfo = Apdu::read_record(0x01, 0x14, 0x33);
        if let Some(number) = Self::card_number_via(transceiver, &cardinfo) {
            info!("card number found via CARDINFO");
            return number;
        }
        let get_data = Apdu::proprietary(INS_GET_DATA, 0x00, 0x00, 0x00);
        if let Some(number) = Self::card_number_via(transceiver, &get_data) {
            info!("card number found via GET DATA");
            return number;
        }
        warn!("card number not found, using hardware id");
        card_id.to_hex()
    }

    /// Send one card-number command, honoring the wrong-length retry.
    fn card_number_via(transceiver: &mut dyn Transceiver, apdu: &Apdu) -> Option<String> {
        let response = transceiver
            .exchange(apdu.as_bytes(), DEFAULT_EXCHANGE_TIMEOUT_MS)
            .ok()?;
        let (payload, sw) = split_payload(&response).ok()?;
        match sw {
            StatusWord::Success => Self::find_card_number(payload),
            StatusWord::WrongLength(n) if n > 0 => {
                let response = transceiver
                    .exchange(apdu.with_le(n).as_bytes(), DEFAULT_EXCHANGE_TIMEOUT_MS)
                    .ok()?;
                let (payload, sw) = split_payload(&response).ok()?;
                if sw.is_success() && !payload.is_empty() {
                    Self::find_card_number(payload)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Search ladder over an arbitrary payload: FCI offset 8, then the
    /// 0x5A / 0x57 tags in the order they appear, then any 8-byte BCD run.
    fn find_card_number(payload: &[u8]) -> Option<String> {
        if payload.len() < 8 {
            return None;
        }

        if payload.len() >= 16 && payload[0] == TAG_FCI_TEMPLATE {
            if let Some(number) = fields::bcd_card_number(payload, 8, 8) {
                if fields::is_valid_card_number(&number) {
                    debug!("card number found at FCI offset 8");
                    return Some(number);
                }
            }
        }

        // single pass so the 0x5A and 0x57 tags are tried in wire order
        let mut i = 0;
        while i + 1 < payload.len() {
            let tag = payload[i];
            let len = payload[i + 1] as usize;
            if tag == TAG_PAN && (1..=10).contains(&len) {
                if let Some(value) = payload.get(i + 2..i + 2 + len) {
                    if let Some(number) =
                        fields::decode_bcd(value).and_then(|digits| fields::group_digits(&digits))
                    {
                        if fields::is_valid_card_number(&number) {
                            return Some(number);
                        }
                    }
                }
            }
            if tag == TAG_TRACK2 && (1..=19).contains(&len) {
                if let Some(value) = payload.get(i + 2..i + 2 + len) {
                    if let Some(number) = fields::group_digits(&fields::track2_digits(value)) {
                        if fields::is_valid_card_number(&number) {
                            return Some(number);
                        }
                    }
                }
            }
            i += 1;
        }

        for i in 0..=payload.len() - 8 {
            if fields::is_bcd_run(payload, i, 8) {
                if let Some(number) = fields::bcd_card_number(payload, i, 8) {
                    if fields::is_valid_card_number(&number) {
                        return Some(number);
                    }
                }
            }
        }

        None
    }

    /// Three strategies, first non-empty wins: the proprietary
    /// transaction read, then SFI 3, then SFI 4.
    pub fn read_history(&self, transceiver: &mut dyn Transceiver) -> Vec<Transaction> {
        let transactions = Self::proprietary_history(transceiver);
        if !transactions.is_empty() {
            return transactions;
        }

        let sfi3 = RecordScan {
            p2: P2_TRANS_RECORD,
            le: LE_RECORD,
            max_records: MAX_RECORDS,
            empty_prefix: 8,
        };
        let transactions = record::scan(transceiver, &sfi3, Self::parse_record);
        if !transactions.is_empty() {
            return transactions;
        }

        let sfi4 = RecordScan {
            p2: P2_BALANCE_RECORD,
            le: LE_RECORD,
            max_records: MAX_RECORDS,
            empty_prefix: 8,
        };
        record::scan(transceiver, &sfi4, Self::parse_record)
    }

    /// `90 4E 00 <index> 00` probe loop. Unlike the READ RECORD scan this
    /// keeps probing on unparseable 90xx answers and stops only when the
    /// card answers with neither success nor wrong-length.
    fn proprietary_history(transceiver: &mut dyn Transceiver) -> Vec<Transaction> {
        let mut transactions = Vec::new();
        for index in 1..=MAX_RECORDS {
            let apdu = Apdu::proprietary(INS_GET_TRANSACTION, 0x00, index, 0x00);
            let response = match transceiver.exchange(apdu.as_bytes(), DEFAULT_EXCHANGE_TIMEOUT_MS)
            {
                Ok(response) => response,
                Err(err) => {
                    debug!("transaction {}: transport fault: {}", index, err);
                    break;
                }
            };
            let (payload, sw) = match split_payload(&response) {
                Ok(split) => split,
                Err(_) => break,
            };
            match sw {
                StatusWord::Success => {
                    if payload.len() >= 8 {
                        if let Some(tx) = Self::parse_record(payload) {
                            transactions.push(tx);
                        }
                    }
                }
                StatusWord::WrongLength(n) => {
                    if n == 0 {
                        continue;
                    }
                    let retry = apdu.with_le(n);
                    let response = match transceiver
                        .exchange(retry.as_bytes(), DEFAULT_EXCHANGE_TIMEOUT_MS)
                    {
                        Ok(response) => response,
                        Err(_) => break,
                    };
                    if let Ok((payload, sw)) = split_payload(&response) {
                        if sw.is_success() && payload.len() >= 8 {
                            if let Some(tx) = Self::parse_record(payload) {
                                transactions.push(tx);
                            }
                        }
                    }
                }
                sw if sw.sw1() == 0x90 => {
                    // 90xx warning with no usable record; keep probing
                }
                other => {
                    debug!("transaction {}: probe stopped on {:?}", index, other);
                    break;
                }
            }
        }
        transactions
    }

    /// Try every layout hypothesis in order; the first whose amounts pass
    /// the validity policy wins.
    fn parse_record(payload: &[u8]) -> Option<Transaction> {
        if payload.len() < 8 || fields::is_empty_record(payload, 8) {
            return None;
        }
        if payload.len() < 13 {
            return None;
        }
        LAYOUTS
            .iter()
            .find_map(|layout| Self::try_layout(payload, layout))
    }

    fn try_layout(payload: &[u8], layout: &RecordLayout) -> Option<Transaction> {
        let amount = fields::be_u32(payload, layout.amount_at)?;
        let balance = fields::be_u32(payload, layout.balance_at)?;
        if amount == 0 || !fields::is_valid_amount(amount) || !fields::is_valid_amount(balance) {
            return None;
        }
        let kind_code = *payload.get(layout.kind_at)?;
        let date = fields::bcd_date(payload, layout.date_at);
        Some(Self::build_transaction(kind_code, date, amount, balance))
    }

    fn build_transaction(
        kind_code: u8,
        date: Option<String>,
        amount: u32,
        balance: u32,
    ) -> Transaction {
        let kind = match kind_code {
            0x04 | 0x05 | 0x10 | 0x11 => TxKind::Charge,
            _ => TxKind::Use,
        };
        let location = match kind_code {
            0x01 => "승차",
            0x02 => "하차",
            0x03 => "환승",
            0x04 | 0x05 | 0x10 | 0x11 => "충전",
            0x20 | 0x21 => "결제",
            _ => "사용",
        };
        Transaction::new(kind, date, location, amount, balance)
    }
}
