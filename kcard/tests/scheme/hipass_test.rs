#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use kcard::constants::{TAG_PAN_HIPASS, AID_HIPASS_IN_FCI};
use kcard::scheme::Hipass;
use kcard::transport::MockTransceiver;
use kcard::TxKind;

fn fci_with_pan(bcd: [u8; 8]) -> Vec<u8> {
    let mut payload = vec![0x6F, 0x0C, 0xA5, 0x00];
    payload.push(TAG_PAN_HIPASS);
    payload.push(0x08);
    payload.extend_from_slice(&bcd);
    payload
}

#[test]
fn primary_fci_supplies_the_card_number_without_io() {
    let hipass = Hipass::new(Some(fci_with_pan(fixtures::SAMPLE_NUMBER_BCD)));
    let mut mock = MockTransceiver::new();

    let number = hipass.read_card_number(&mut mock, &fixtures::sample_card_id());
    assert_eq!(number, fixtures::SAMPLE_NUMBER);
    assert!(mock.sent.is_empty());
}

#[test]
fn secondary_select_sends_hipass_aid_and_tolerates_62() {
    let mut mock = MockTransceiver::new();
    mock.push_response(fixtures::with_sw(
        &fci_with_pan(fixtures::SAMPLE_NUMBER_BCD),
        0x62,
        0x83,
    ));

    let mut hipass = Hipass::new(None);
    assert!(hipass.select_secondary(&mut mock));

    let mut expected = vec![0x00, 0xA4, 0x04, 0x00, 0x07];
    expected.extend_from_slice(&AID_HIPASS_IN_FCI);
    expected.push(0x00);
    assert_eq!(mock.sent[0], expected);

    // the 62xx FCI is still usable for the card number
    let number = hipass.read_card_number(&mut mock, &fixtures::sample_card_id());
    assert_eq!(number, fixtures::SAMPLE_NUMBER);
}

#[test]
fn read_binary_is_the_last_on_card_fallback() {
    let mut mock = MockTransceiver::new();
    let mut info = vec![0u8; 12];
    info[0..8].copy_from_slice(&fixtures::SAMPLE_NUMBER_BCD);
    mock.push_response(fixtures::ok(&info));

    let hipass = Hipass::new(None);
    let number = hipass.read_card_number(&mut mock, &fixtures::sample_card_id());
    assert_eq!(number, fixtures::SAMPLE_NUMBER);
    assert_eq!(mock.sent[0], vec![0x00, 0xB0, 0x88, 0x00, 0x0C]);
}

#[test]
fn hipass_balance_uses_its_own_instruction() {
    let mut mock = MockTransceiver::new();
    mock.push_response(fixtures::ok(&fixtures::balance_payload(7_300)));

    assert_eq!(Hipass::new(None).read_balance(&mut mock), 7_300);
    assert_eq!(mock.sent[0], vec![0x90, 0x5C, 0x00, 0x00, 0x04]);
}

#[test]
fn history_stops_at_the_first_yielding_record_file() {
    let mut mock = MockTransceiver::new();
    // p2 0x14 empty, p2 0x1C has one record
    mock.push_response(fixtures::not_found());
    mock.push_response(fixtures::ok(&fixtures::hipass_record(0x04, 10_000, 30_000)));
    mock.push_response(fixtures::not_found());

    let transactions = Hipass::new(None).read_history(&mut mock);
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].kind, TxKind::Charge);
    assert_eq!(transactions[0].location, "충전");

    assert_eq!(mock.sent.len(), 3);
    assert_eq!(mock.sent[1][3], 0x1C);
}

#[test]
fn use_records_are_labeled_hipass() {
    let mut mock = MockTransceiver::new();
    mock.push_response(fixtures::ok(&fixtures::hipass_record(0x05, 4_500, 25_500)));
    mock.push_response(fixtures::not_found());

    let transactions = Hipass::new(None).read_history(&mut mock);
    assert_eq!(transactions[0].kind, TxKind::Use);
    assert_eq!(transactions[0].location, "하이패스");
}
