use kcard::constants::{AID_EZL_IN_FCI, AID_HIPASS_IN_FCI};
use kcard::protocol::fields::{
    bcd_card_number, bcd_date, decode_bcd, fci_contains_aid, is_empty_record, is_valid_amount,
    is_valid_card_number, track2_digits,
};

#[test]
fn bcd_decode_and_validity() {
    // all-digit nibbles decode
    assert_eq!(decode_bcd(&[0x12, 0x34]).unwrap(), "1234");
    // any nibble above 9 makes the field invalid
    assert_eq!(decode_bcd(&[0x12, 0x3A]), None);
    assert_eq!(decode_bcd(&[0xF2, 0x34]), None);
}

#[test]
fn card_number_validity_policy() {
    assert!(is_valid_card_number("1010 1234 5678 9012"));
    assert!(!is_valid_card_number("0000000000000000"));
    assert!(!is_valid_card_number("123"));
}

#[test]
fn card_number_formatting_groups_of_four() {
    let data = [0x10, 0x10, 0x12, 0x34, 0x56, 0x78, 0x90, 0x12];
    assert_eq!(bcd_card_number(&data, 0, 8).unwrap(), "1010 1234 5678 9012");
}

#[test]
fn amount_validity_boundaries() {
    assert!(is_valid_amount(0));
    assert!(is_valid_amount(500_000));
    assert!(!is_valid_amount(500_001));
}

#[test]
fn empty_record_both_fills() {
    assert!(is_empty_record(&[0x00; 46], 16));
    assert!(is_empty_record(&[0xFF; 46], 16));

    let mut written = [0x00u8; 46];
    written[2] = 0x05;
    assert!(!is_empty_record(&written, 16));
}

#[test]
fn fci_aid_containment_disambiguates_schemes() {
    let mut fci = vec![0x6F, 0x0B, 0x4F, 0x07];
    fci.extend_from_slice(&AID_HIPASS_IN_FCI);

    assert!(fci_contains_aid(&fci, &AID_HIPASS_IN_FCI));
    assert!(!fci_contains_aid(&fci, &AID_EZL_IN_FCI));
}

#[test]
fn track2_decode_stops_at_separator() {
    let data = [0x12, 0x34, 0x56, 0x78, 0x90, 0x12, 0x34, 0x56, 0xD1, 0x23];
    assert_eq!(track2_digits(&data), "1234567890123456");
}

#[test]
fn bcd_date_rejects_out_of_range_fields() {
    assert_eq!(bcd_date(&[0x24, 0x06, 0x01, 0x23], 0).unwrap(), "24/06/01 23:00");
    assert_eq!(bcd_date(&[0x24, 0x00, 0x01, 0x00], 0), None); // month 0
    assert_eq!(bcd_date(&[0x24, 0x06, 0x32, 0x00], 0), None); // day 32
    assert_eq!(bcd_date(&[0x24, 0x06, 0x01, 0x24], 0), None); // hour 24
}
