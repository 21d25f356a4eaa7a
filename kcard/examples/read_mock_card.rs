// Reads a simulated T-money card through the mock transceiver.

// This example demonstrates the full session flow (connect, detect,
// parse) without hardware: the mock is seeded with the responses a real
// card would give. Swap in your own Transceiver implementation to talk to
// an actual reader.

use kcard::prelude::*;
use kcard::types::CardId;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut mock = MockTransceiver::new();

    // SELECT T-money succeeds with a minimal FCI
    mock.push_response(vec![0x6F, 0x00, 0x90, 0x00]);
    // balance: 50 000 won
    mock.push_response(vec![0x00, 0x00, 0xC3, 0x50, 0x90, 0x00]);
    // CARDINFO: FCI with the BCD card number at offset 8
    let mut cardinfo = vec![0u8; 16];
    cardinfo[0] = 0x6F;
    cardinfo[8..16].copy_from_slice(&[0x10, 0x10, 0x12, 0x34, 0x56, 0x78, 0x90, 0x12]);
    cardinfo.extend_from_slice(&[0x90, 0x00]);
    mock.push_response(cardinfo);
    // one use, one charge, then the end of the record file
    let mut use_record = vec![0u8; 44];
    use_record[0] = 0x01;
    use_record[4..6].copy_from_slice(&48_750u16.to_be_bytes());
    use_record[12..14].copy_from_slice(&1_250u16.to_be_bytes());
    use_record.extend_from_slice(&[0x90, 0x00]);
    mock.push_response(use_record);
    let mut charge_record = vec![0u8; 44];
    charge_record[0] = 0x02;
    charge_record[4..6].copy_from_slice(&50_000u16.to_be_bytes());
    charge_record[12..14].copy_from_slice(&10_000u16.to_be_bytes());
    charge_record.extend_from_slice(&[0x90, 0x00]);
    mock.push_response(charge_record);
    mock.push_response(vec![0x6A, 0x83]);

    let card_id = CardId::new(vec![0x04, 0xA2, 0x24, 0x8D]);
    let result = read_card(&mut mock, card_id)?;

    println!("scheme:      {}", result.scheme.display_name());
    println!("card number: {}", result.card_number);
    println!("balance:     {}won", result.balance);
    println!("transactions:");
    for tx in &result.transactions {
        println!(
            "  {:?} | {} | {}won | balance {}won",
            tx.kind,
            tx.location,
            tx.amount,
            tx.balance_after
        );
    }

    Ok(())
}
