// kcard/src/scheme/hipass.rs

use log::{debug, info, warn};

use crate::constants::{AID_HIPASS_IN_FCI, INS_GET_BALANCE_HIPASS, TAG_FCI_TEMPLATE, TAG_PAN_HIPASS};
use crate::protocol::fields::{self, TlvScan};
use crate::protocol::{split_payload, Apdu};
use crate::scheme::record::{self, RecordScan};
use crate::transport::Transceiver;
use crate::types::{CardId, Transaction, TxKind};
use crate::utils::DEFAULT_EXCHANGE_TIMEOUT_MS;

/// P2 bytes of the record files that have been observed to hold history
/// on different Hipass batches; the first one that yields anything wins.
const SFI_P2_VALUES: [u8; 5] = [0x14, 0x1C, 0x24, 0x2C, 0x34];
/// 36-byte transaction records.
const LE_RECORD: u8 = 0x24;
const MAX_RECORDS: u8 = 10;

/// Hipass decoder. The card number can come from the primary (detection)
/// FCI, the secondary-select FCI, or a READ BINARY of the card-info file,
/// in that order.
#[derive(Debug, Default)]
pub struct Hipass {
    primary_fci: Option<Vec<u8>>,
    secondary_fci: Option<Vec<u8>>,
}

impl Hipass {
    pub fn new(primary_fci: Option<Vec<u8>>) -> Self {
        Self {
            primary_fci,
            secondary_fci: None,
        }
    }

    /// Select the Hipass secondary application. Observed cards answer
    /// either 90xx or 62xx with a usable FCI; both count as selected.
    pub fn select_secondary(&mut self, transceiver: &mut dyn Transceiver) -> bool {
        let apdu = Apdu::select_aid(&AID_HIPASS_IN_FCI);
        let response = match transceiver.exchange(apdu.as_bytes(), DEFAULT_EXCHANGE_TIMEOUT_MS) {
            Ok(response) => response,
            Err(err) => {
                debug!("secondary AID exchange failed: {}", err);
                return false;
            }
        };
        match split_payload(&response) {
            Ok((payload, sw)) => {
                if !payload.is_empty() {
                    self.secondary_fci = Some(payload.to_vec());
                }
                matches!(sw.sw1(), 0x90 | 0x62)
            }
            Err(_) => false,
        }
    }

    pub fn read_balance(&self, transceiver: &mut dyn Transceiver) -> u32 {
        super::read_balance_be32(
            transceiver,
            &Apdu::proprietary(INS_GET_BALANCE_HIPASS, 0x00, 0x00, 0x04),
        )
    }

    pub fn read_card_number(&self, transceiver: &mut dyn Transceiver, card_id: &CardId) -> String {
        if let Some(number) = self.primary_fci.as_deref().and_then(Self::card_number_from_fci) {
            info!("card number found in primary FCI");
            return number;
        }
        if let Some(number) = self
            .secondary_fci
            .as_deref()
            .and_then(Self::card_number_from_fci)
        {
            info!("card number found in secondary FCI");
            return number;
        }
        if let Some(number) = self.card_number_from_cardinfo(transceiver) {
            info!("card number found via READ BINARY");
            return number;
        }
        warn!("card number not found, using hardware id");
        card_id.to_hex()
    }

    /// Hipass FCIs carry the PAN under tag 0x13 as 8 BCD bytes.
    fn card_number_from_fci(payload: &[u8]) -> Option<String> {
        if payload.first() != Some(&TAG_FCI_TEMPLATE) {
            return None;
        }
        TlvScan::new(payload, TAG_PAN_HIPASS)
            .filter(|value| value.len() == 8)
            .find_map(|value| {
                let number = fields::bcd_card_number(value, 0, 8)?;
                fields::is_valid_card_number(&number).then_some(number)
            })
    }

    fn card_number_from_cardinfo(&self, transceiver: &mut dyn Transceiver) -> Option<String> {
        let apdu = Apdu::read_binary(0x88, 0x00, 0x0C);
        let response = transceiver
            .exchange(apdu.as_bytes(), DEFAULT_EXCHANGE_TIMEOUT_MS)
            .ok()?;
        let (payload, sw) = split_payload(&response).ok()?;
        if !sw.is_success() || payload.len() < 12 {
            return None;
        }
        let number = fields::bcd_card_number(payload, 0, 8)?;
        fields::is_valid_card_number(&number).then_some(number)
    }

    /// History location varies by batch: sweep the known record files and
    /// keep the first that yields transactions.
    pub fn read_history(&self, transceiver: &mut dyn Transceiver) -> Vec<Transaction> {
        for p2 in SFI_P2_VALUES {
            let params = RecordScan {
                p2,
                le: LE_RECORD,
                max_records: MAX_RECORDS,
                empty_prefix: 16,
            };
            let transactions = record::scan(transceiver, &params, Self::parse_record);
            if !transactions.is_empty() {
                info!(
                    "found {} transactions in record file p2={:#04x}",
                    transactions.len(),
                    p2
                );
                return transactions;
            }
        }
        Vec::new()
    }

    /// Hipass record layout: amount BE u16 at 9, balance BE u16 at 13,
    /// type at 16 (0x04 = charge, else use). Zero amounts mark a
    /// misparsed record on this scheme.
    fn parse_record(payload: &[u8]) -> Option<Transaction> {
        if payload.len() < 18 {
            return None;
        }
        let amount = fields::be_u16(payload, 9)? as u32;
        let balance = fields::be_u16(payload, 13)? as u32;
        let kind_code = payload[16];
        if amount == 0 || !fields::is_valid_amount(amount) || !fields::is_valid_amount(balance) {
            return None;
        }

        let (kind, location) = if kind_code == 0x04 {
            (TxKind::Charge, "충전")
        } else {
            (TxKind::Use, "하이패스")
        };
        Some(Transaction::new(kind, None, location, amount, balance))
    }
}
