// kcard/src/scheme/record.rs

use log::debug;

use crate::protocol::fields;
use crate::protocol::{split_payload, Apdu, StatusWord};
use crate::transport::Transceiver;
use crate::types::Transaction;
use crate::utils::DEFAULT_EXCHANGE_TIMEOUT_MS;

/// Parameters of one READ RECORD sweep. The P2 byte carries the SFI
/// reference; `le` is the expected record length the scheme starts with.
#[derive(Debug, Clone, Copy)]
pub struct RecordScan {
    pub p2: u8,
    pub le: u8,
    pub max_records: u8,
    /// Number of leading bytes inspected by the empty-slot check.
    pub empty_prefix: usize,
}

/// Shared record-scan loop.
///
/// For record 1..=max_records:
/// - `WrongLength(n)` with n > 0 is retried once with Le = n; the retry
///   must come back Success or the scan ends.
/// - Success payloads that are empty slots or fail to parse are skipped
///   without terminating the scan.
/// - `NoMoreRecords` is the normal termination.
/// - Any other status, and any transport fault, stops the scan
///   immediately; whatever was collected so far is returned.
///
/// Cards store the newest transaction in the lowest record index, so the
/// natural scan order already yields newest-first.
pub fn scan<F>(
    transceiver: &mut dyn Transceiver,
    params: &RecordScan,
    parse: F,
) -> Vec<Transaction>
where
    F: Fn(&[u8]) -> Option<Transaction>,
{
    let mut transactions = Vec::new();

    'records: for record in 1..=params.max_records {
        let apdu = Apdu::read_record(record, params.p2, params.le);
        let response = match transceiver.exchange(apdu.as_bytes(), DEFAULT_EXCHANGE_TIMEOUT_MS) {
            Ok(response) => response,
            Err(err) => {
                debug!("record {}: transport fault: {}", record, err);
                break;
            }
        };
        let (payload, sw) = match split_payload(&response) {
            Ok(split) => split,
            Err(err) => {
                debug!("record {}: {}", record, err);
                break;
            }
        };

        let payload = match sw {
            StatusWord::Success => payload.to_vec(),
            StatusWord::WrongLength(n) if n > 0 => {
                // the card dictates the exact record length; retry once
                let retry = apdu.with_le(n);
                let response =
                    match transceiver.exchange(retry.as_bytes(), DEFAULT_EXCHANGE_TIMEOUT_MS) {
                        Ok(response) => response,
                        Err(err) => {
                            debug!("record {} retry: transport fault: {}", record, err);
                            break;
                        }
                    };
                match split_payload(&response) {
                    Ok((payload, StatusWord::Success)) => payload.to_vec(),
                    _ => {
                        debug!("record {} retry with le={:#04x} failed", record, n);
                        break;
                    }
                }
            }
            StatusWord::NoMoreRecords => break,
            other => {
                debug!("record {}: scan stopped on {:?}", record, other);
                break;
            }
        };

        if fields::is_empty_record(&payload, params.empty_prefix) {
            debug!("record {}: empty slot", record);
            continue 'records;
        }
        match parse(&payload) {
            Some(tx) => transactions.push(tx),
            None => debug!("record {}: no valid layout", record),
        }
    }

    transactions
}
