#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use kcard::scheme::RailPlus;
use kcard::transport::MockTransceiver;
use kcard::TxKind;

#[test]
fn proprietary_history_is_the_first_strategy() {
    let mut mock = MockTransceiver::new();
    mock.push_response(fixtures::ok(&fixtures::railplus_record(0x01, 1_350, 8_650)));
    mock.push_response(fixtures::ok(&fixtures::railplus_record(0x02, 1_350, 8_650)));
    mock.push_response(fixtures::not_found());

    let transactions = RailPlus::new().read_history(&mut mock);
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].location, "승차");
    assert_eq!(transactions[1].location, "하차");

    assert_eq!(mock.sent[0], vec![0x90, 0x4E, 0x00, 0x01, 0x00]);
    assert_eq!(mock.sent[1], vec![0x90, 0x4E, 0x00, 0x02, 0x00]);
}

#[test]
fn record_dates_are_decoded_from_packed_bcd() {
    let mut mock = MockTransceiver::new();
    mock.push_response(fixtures::ok(&fixtures::railplus_record(0x03, 1_000, 5_000)));
    mock.push_response(fixtures::not_found());

    let transactions = RailPlus::new().read_history(&mut mock);
    assert_eq!(transactions[0].date.as_deref(), Some("24/03/15 09:00"));
    assert_eq!(transactions[0].kind, TxKind::Use);
    assert_eq!(transactions[0].location, "환승");
}

#[test]
fn charge_codes_map_to_charge() {
    for code in [0x04u8, 0x05, 0x10, 0x11] {
        let mut mock = MockTransceiver::new();
        mock.push_response(fixtures::ok(&fixtures::railplus_record(code, 10_000, 15_000)));
        mock.push_response(fixtures::not_found());

        let transactions = RailPlus::new().read_history(&mut mock);
        assert_eq!(transactions[0].kind, TxKind::Charge, "code {:#04x}", code);
        assert_eq!(transactions[0].location, "충전");
    }
}

#[test]
fn history_falls_back_to_sfi3_then_sfi4() {
    let mut mock = MockTransceiver::new();
    // proprietary probe rejected
    mock.push_response(fixtures::not_found());
    // SFI 3 empty
    mock.push_response(fixtures::not_found());
    // SFI 4 carries the history
    mock.push_response(fixtures::ok(&fixtures::railplus_record(0x20, 5_000, 10_000)));
    mock.push_response(fixtures::not_found());

    let transactions = RailPlus::new().read_history(&mut mock);
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].location, "결제");
    assert_eq!(transactions[0].kind, TxKind::Use);

    assert_eq!(mock.sent[1], vec![0x00, 0xB2, 0x01, 0x1C, 0x2E]);
    assert_eq!(mock.sent[2], vec![0x00, 0xB2, 0x01, 0x24, 0x2E]);
}

#[test]
fn card_number_found_in_fci_shaped_cardinfo() {
    let mut fci = vec![0u8; 32];
    fci[0] = 0x6F;
    fci[8..16].copy_from_slice(&fixtures::SAMPLE_NUMBER_BCD);

    let mut mock = MockTransceiver::new();
    mock.push_response(fixtures::ok(&fci));

    let number = RailPlus::new().read_card_number(&mut mock, &fixtures::sample_card_id());
    assert_eq!(number, fixtures::SAMPLE_NUMBER);
    assert_eq!(mock.sent[0], vec![0x00, 0xB2, 0x01, 0x14, 0x33]);
}

#[test]
fn card_number_wrong_length_retry_then_get_data() {
    let mut mock = MockTransceiver::new();
    // CARDINFO asks for a different length, retry yields nothing usable
    mock.push_response(fixtures::with_sw(&[], 0x6C, 0x10));
    mock.push_response(fixtures::ok(&[0u8; 16]));
    // GET DATA answers a raw payload with a PAN tag
    let mut payload = vec![0x00, 0x00];
    payload.push(0x5A);
    payload.push(0x08);
    payload.extend_from_slice(&fixtures::SAMPLE_NUMBER_BCD);
    mock.push_response(fixtures::ok(&payload));

    let number = RailPlus::new().read_card_number(&mut mock, &fixtures::sample_card_id());
    assert_eq!(number, fixtures::SAMPLE_NUMBER);

    assert_eq!(mock.sent[1], vec![0x00, 0xB2, 0x01, 0x14, 0x10]);
    assert_eq!(mock.sent[2], vec![0x90, 0x4A, 0x00, 0x00, 0x00]);
}

#[test]
fn card_number_exhausted_falls_back_to_hardware_id() {
    let mut mock = MockTransceiver::new();
    mock.push_response(fixtures::not_found());
    mock.push_response(fixtures::not_found());

    let number = RailPlus::new().read_card_number(&mut mock, &fixtures::sample_card_id());
    assert_eq!(number, "04A2248D");
}
