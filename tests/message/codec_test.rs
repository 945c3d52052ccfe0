// Message codec tests

use seq2_ledger::identity::Address;
use seq2_ledger::ledger::LedgerError;
use seq2_ledger::message::{op_codes, CodecError, InboundMessage, MessageCodec, Operation};

fn alice() -> Address {
    Address::from_bytes([0xa1; 32])
}

fn bob() -> Address {
    Address::from_bytes([0xb0; 32])
}

#[test]
fn test_binary_roundtrip_preserves_operation() {
    let msg = InboundMessage::transfer(alice(), bob(), 50);
    let decoded = MessageCodec::decode(&MessageCodec::encode(&msg).unwrap()).unwrap();

    assert_eq!(decoded, msg);
    assert_eq!(decoded.operation().unwrap(), Operation::Transfer { to: bob(), amount: 50 });
}

#[test]
fn test_hex_and_base64_decode_to_same_message() {
    let msg = InboundMessage::deposit(alice(), 1_500_000_000);
    let from_hex = MessageCodec::decode_hex(&MessageCodec::encode_hex(&msg).unwrap()).unwrap();
    let from_b64 = MessageCodec::decode_base64(&MessageCodec::encode_base64(&msg).unwrap()).unwrap();

    assert_eq!(from_hex, from_b64);
    assert_eq!(from_hex.attached_value, 1_500_000_000);
}

#[test]
fn test_hex_input_is_trimmed() {
    let msg = InboundMessage::set_freeze(alice(), true);
    let hex = format!("  {}\n", MessageCodec::encode_hex(&msg).unwrap());
    assert_eq!(MessageCodec::decode_hex(&hex).unwrap(), msg);
}

#[test]
fn test_invalid_text_forms() {
    assert!(matches!(MessageCodec::decode_hex("xyz"), Err(CodecError::InvalidHex(_))));
    assert!(matches!(MessageCodec::decode_base64("@@@"), Err(CodecError::InvalidBase64(_))));
}

#[test]
fn test_truncated_bytes_fail() {
    let bytes = MessageCodec::encode(&InboundMessage::mint(alice(), bob(), 9)).unwrap();
    let result = MessageCodec::decode(&bytes[..bytes.len() / 2]);
    assert!(matches!(result, Err(CodecError::DecodeError(_))));
}

#[test]
fn test_unknown_op_code_survives_codec_and_fails_at_dispatch() {
    let msg = InboundMessage::new(alice(), 0, 99, Default::default());
    let decoded = MessageCodec::decode(&MessageCodec::encode(&msg).unwrap()).unwrap();

    assert_eq!(decoded.op_code, 99);
    assert_eq!(decoded.operation(), Err(LedgerError::UnknownOperation(99)));
}

#[test]
fn test_op_codes_are_unique() {
    let ops = [
        Operation::Mint { to: bob(), amount: 1 },
        Operation::Burn { from: bob(), amount: 1 },
        Operation::Transfer { to: bob(), amount: 1 },
        Operation::Deposit,
        Operation::Withdraw { amount: 1 },
        Operation::SetPrice { new_price: 1 },
        Operation::SetFreeze { frozen: true },
        Operation::SetOracle { oracle: bob() },
        Operation::TransferOwnership { new_owner: bob() },
    ];

    let mut codes: Vec<u32> = ops.iter().map(|op| op.op_code()).collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), ops.len());
    assert_eq!(Operation::Deposit.op_code(), op_codes::OP_DEPOSIT);
}
