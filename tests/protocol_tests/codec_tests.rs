//! Codec Tests
//!
//! Tests for request decoding/encoding and read payloads.

use ictkv::protocol::{
    Command, Opcode, ReadStatus,
    decode_command, encode_command,
    encode_value, encode_missing, decode_value,
    MISSING_MARKER,
};
use ictkv::table::Field;
use ictkv::IctError;

fn field(bytes: &[u8]) -> Field {
    Field::new(bytes).unwrap()
}

fn assert_malformed(bytes: &[u8]) {
    match decode_command(bytes) {
        Err(IctError::Malformed(_)) => {}
        other => panic!("Expected Malformed for {:?}, got {:?}", bytes, other),
    }
}

// =============================================================================
// Request Decoding Tests
// =============================================================================

#[test]
fn test_decode_push() {
    let command = decode_command(b"0|name|alice").unwrap();
    assert_eq!(
        command,
        Command::Push {
            key: field(b"name"),
            value: field(b"alice"),
        }
    );
}

#[test]
fn test_decode_get() {
    let command = decode_command(b"1|name").unwrap();
    assert_eq!(command, Command::Get { key: field(b"name") });
}

#[test]
fn test_decode_edit() {
    let command = decode_command(b"2|name|bob").unwrap();
    assert_eq!(
        command,
        Command::Edit {
            key: field(b"name"),
            value: field(b"bob"),
        }
    );
}

#[test]
fn test_decode_delete() {
    let command = decode_command(b"3|name").unwrap();
    assert_eq!(command, Command::Delete { key: field(b"name") });
}

#[test]
fn test_decode_strips_one_line_ending() {
    let command = decode_command(b"0|k|v\n").unwrap();
    assert_eq!(command, Command::Push { key: field(b"k"), value: field(b"v") });

    let command = decode_command(b"1|k\r\n").unwrap();
    assert_eq!(command, Command::Get { key: field(b"k") });
}

#[test]
fn test_decode_push_discards_extra_fields() {
    let command = decode_command(b"0|key|value|extra|more").unwrap();
    assert_eq!(
        command,
        Command::Push {
            key: field(b"key"),
            value: field(b"value"),
        }
    );
}

#[test]
fn test_decode_get_rejects_delimiter_in_key() {
    assert_malformed(b"1|key|extra");
    assert_malformed(b"3|key|extra");
}

#[test]
fn test_decode_missing_opcode() {
    assert_malformed(b"|key|value");
    assert_malformed(b"");
}

#[test]
fn test_decode_unparseable_opcode() {
    assert_malformed(b"x|key|value");
    assert_malformed(b" 0|key|value");
    assert_malformed(b"-1|key");
}

#[test]
fn test_decode_unknown_opcode() {
    assert_malformed(b"4|key");
    assert_malformed(b"255|key|value");
}

#[test]
fn test_decode_opcode_must_be_single_digit() {
    assert_malformed(b"+1|key");
    assert_malformed(b"01|key");
    assert_malformed(b"0000|k|v");
    assert_malformed(b"|key");
}

#[test]
fn test_decode_missing_body() {
    assert_malformed(b"0");
    assert_malformed(b"1");
    assert_malformed(b"1|");
    assert_malformed(b"0|");
}

#[test]
fn test_decode_push_missing_value() {
    assert_malformed(b"0|key");
    assert_malformed(b"0|key|");
    assert_malformed(b"2|key");
}

#[test]
fn test_decode_empty_key() {
    assert_malformed(b"0||value");
}

#[test]
fn test_decode_field_length_limit() {
    let at_limit = "k".repeat(49);
    let request = format!("1|{}", at_limit);
    assert!(decode_command(request.as_bytes()).is_ok());

    let over_limit = "k".repeat(50);
    assert_malformed(format!("1|{}", over_limit).as_bytes());
    assert_malformed(format!("0|key|{}", over_limit).as_bytes());
}

#[test]
fn test_decode_binary_opcode_is_malformed() {
    assert_malformed(&[0xff, b'|', b'k']);
}

// =============================================================================
// Request Encoding Tests
// =============================================================================

#[test]
fn test_encode_commands() {
    let push = Command::Push { key: field(b"k"), value: field(b"v") };
    let get = Command::Get { key: field(b"k") };
    let edit = Command::Edit { key: field(b"k"), value: field(b"w") };
    let delete = Command::Delete { key: field(b"k") };

    assert_eq!(encode_command(&push), b"0|k|v");
    assert_eq!(encode_command(&get), b"1|k");
    assert_eq!(encode_command(&edit), b"2|k|w");
    assert_eq!(encode_command(&delete), b"3|k");
}

#[test]
fn test_encoded_command_decodes_to_itself() {
    let command = Command::Edit {
        key: field(b"session-id"),
        value: field(b"0x5f3759df"),
    };
    assert_eq!(decode_command(&encode_command(&command)).unwrap(), command);
}

#[test]
fn test_opcode_values() {
    assert_eq!(Opcode::Push as u8, 0);
    assert_eq!(Opcode::Get as u8, 1);
    assert_eq!(Opcode::Edit as u8, 2);
    assert_eq!(Opcode::Delete as u8, 3);
    assert!(Opcode::try_from(4u8).is_err());
    assert_eq!(Command::Get { key: field(b"k") }.opcode(), Opcode::Get);
}

// =============================================================================
// Read Payload Tests
// =============================================================================

#[test]
fn test_encode_value_appends_terminator() {
    let mut buffer = [0xAAu8; 8];
    let written = encode_value(b"abc", &mut buffer).unwrap();

    assert_eq!(written, 4);
    assert_eq!(&buffer[..4], b"abc\0");
    assert_eq!(buffer[4], 0xAA);
    assert_eq!(decode_value(&buffer), Some(&b"abc"[..]));
}

#[test]
fn test_encode_value_exact_fit() {
    let mut buffer = [0u8; 4];
    assert_eq!(encode_value(b"abc", &mut buffer).unwrap(), 4);
}

#[test]
fn test_encode_value_short_buffer_is_copy_fault() {
    let mut buffer = [0u8; 3];
    match encode_value(b"abc", &mut buffer) {
        Err(IctError::CopyFault { needed, available }) => {
            assert_eq!(needed, 4);
            assert_eq!(available, 3);
        }
        other => panic!("Expected CopyFault, got {:?}", other),
    }
    assert_eq!(buffer, [0u8; 3]);
}

#[test]
fn test_encode_missing_marker() {
    let mut buffer = [0xFFu8; 8];
    assert_eq!(encode_missing(&mut buffer), 4);
    assert_eq!(&buffer[..4], &MISSING_MARKER);
    assert_eq!(decode_value(&buffer), None);

    let mut short = [0xFFu8; 2];
    assert_eq!(encode_missing(&mut short), 2);
    assert_eq!(short, [0, 0]);
}

#[test]
fn test_decode_value_without_terminator() {
    assert_eq!(decode_value(b"full"), Some(&b"full"[..]));
    assert_eq!(decode_value(b""), None);
}

#[test]
fn test_read_status_codes() {
    assert_eq!(ReadStatus::Missing.code(), 0);
    assert_eq!(ReadStatus::Found.code(), 1);
}
