#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use kcard::constants::AID_EZL_IN_FCI;
use kcard::scheme::Ezl;
use kcard::transport::MockTransceiver;
use kcard::TxKind;

#[test]
fn secondary_selection_precedes_everything() {
    let mut mock = MockTransceiver::new();
    mock.push_response(fixtures::ok(&fixtures::fci_with_card_number(
        fixtures::SAMPLE_NUMBER_BCD,
    )));

    let mut ezl = Ezl::new();
    assert!(ezl.select_secondary(&mut mock));

    let mut expected = vec![0x00, 0xA4, 0x04, 0x00, 0x07];
    expected.extend_from_slice(&AID_EZL_IN_FCI);
    expected.push(0x00);
    assert_eq!(mock.sent[0], expected);
}

#[test]
fn card_number_comes_from_secondary_fci() {
    let mut mock = MockTransceiver::new();
    mock.push_response(fixtures::ok(&fixtures::fci_with_card_number(
        fixtures::SAMPLE_NUMBER_BCD,
    )));

    let mut ezl = Ezl::new();
    ezl.select_secondary(&mut mock);

    // no further command needed for the card number
    let sent_before = mock.sent.len();
    let number = ezl.read_card_number(&mut mock, &fixtures::sample_card_id());
    assert_eq!(number, fixtures::SAMPLE_NUMBER);
    assert_eq!(mock.sent.len(), sent_before);
}

#[test]
fn missing_secondary_fci_means_hardware_id() {
    let mut mock = MockTransceiver::new();
    mock.push_response(fixtures::not_found());

    let mut ezl = Ezl::new();
    assert!(!ezl.select_secondary(&mut mock));

    let number = ezl.read_card_number(&mut mock, &fixtures::sample_card_id());
    assert_eq!(number, "04A2248D");
}

#[test]
fn history_reads_26_byte_records_from_sfi_4() {
    let mut mock = MockTransceiver::new();
    mock.push_response(fixtures::ok(&fixtures::purse_record(0x02, 30_000, 30_000)));
    mock.push_response(fixtures::with_sw(&[], 0x6A, 0x83));

    let transactions = Ezl::new().read_history(&mut mock);
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].kind, TxKind::Charge);

    // record 1 on SFI 4, Le 0x1A
    assert_eq!(mock.sent[0], vec![0x00, 0xB2, 0x01, 0x24, 0x1A]);
}

#[test]
fn history_is_capped_at_ten_records() {
    let mut mock = MockTransceiver::new();
    for _ in 0..15 {
        mock.push_response(fixtures::ok(&fixtures::purse_record(0x01, 1_000, 5_000)));
    }

    let transactions = Ezl::new().read_history(&mut mock);
    assert_eq!(transactions.len(), 10);
    assert_eq!(mock.sent.len(), 10);
}
