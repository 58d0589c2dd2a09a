//! Protocol codec
//!
//! Encoding and decoding functions for requests and read payloads.
//!
//! ## Decoding Rules
//! - One trailing `\n` or `\r\n` is ignored
//! - Field 0 must be a single ASCII digit in `0..=3`
//! - GET/DELETE: everything after the first `|` is the key
//! - PUSH/EDIT: the next two `|`-separated fields are key and value;
//!   anything after a third `|` is discarded
//! - Every field must be a valid [`Field`] (1..=49 bytes, no `|`, no NUL)

use crate::error::{IctError, Result};
use crate::table::{Field, DELIMITER, MAX_FIELD_LEN};

use super::{Command, Opcode};

/// Byte written after a found value
pub const TERMINATOR: u8 = 0;

/// Payload written when there is no value to return
pub const MISSING_MARKER: [u8; 4] = [0; 4];

// =============================================================================
// Request Encoding/Decoding
// =============================================================================

/// Encode a command to its wire form (no line ending)
pub fn encode_command(command: &Command) -> Vec<u8> {
    let opcode = command.opcode() as u8;

    let mut message = Vec::with_capacity(4 + 2 * MAX_FIELD_LEN);
    message.extend_from_slice(opcode.to_string().as_bytes());
    message.push(DELIMITER);

    match command {
        Command::Push { key, value } | Command::Edit { key, value } => {
            message.extend_from_slice(key.as_bytes());
            message.push(DELIMITER);
            message.extend_from_slice(value.as_bytes());
        }
        Command::Get { key } | Command::Delete { key } => {
            message.extend_from_slice(key.as_bytes());
        }
    }

    message
}

/// Decode a request written to a session
pub fn decode_command(bytes: &[u8]) -> Result<Command> {
    let line = strip_line_ending(bytes);

    let mut parts = line.splitn(2, |b| *b == DELIMITER);
    let opcode = parse_opcode(parts.next().unwrap_or_default())?;
    let body = parts
        .next()
        .ok_or_else(|| IctError::Malformed(format!("{} request has no body", opcode)))?;

    match opcode {
        Opcode::Get => Ok(Command::Get {
            key: Field::new(body)?,
        }),
        Opcode::Delete => Ok(Command::Delete {
            key: Field::new(body)?,
        }),
        Opcode::Push => {
            let (key, value) = split_key_value(opcode, body)?;
            Ok(Command::Push { key, value })
        }
        Opcode::Edit => {
            let (key, value) = split_key_value(opcode, body)?;
            Ok(Command::Edit { key, value })
        }
    }
}

/// Parse the opcode field: exactly one ASCII digit
///
/// Signs, leading zeros and whitespace are rejected, so `+1`, `01` and
/// ` 1` are all malformed.
fn parse_opcode(field: &[u8]) -> Result<Opcode> {
    match field {
        [digit @ b'0'..=b'9'] => Opcode::try_from(digit - b'0'),
        _ => Err(IctError::Malformed(format!(
            "invalid opcode '{}'",
            String::from_utf8_lossy(field)
        ))),
    }
}

/// Split a PUSH/EDIT body into key and value, dropping any extra fields
fn split_key_value(opcode: Opcode, body: &[u8]) -> Result<(Field, Field)> {
    let mut fields = body.splitn(3, |b| *b == DELIMITER);

    let key = fields.next().unwrap_or_default();
    let value = fields
        .next()
        .ok_or_else(|| IctError::Malformed(format!("{} request has no value", opcode)))?;

    Ok((Field::new(key)?, Field::new(value)?))
}

fn strip_line_ending(bytes: &[u8]) -> &[u8] {
    let line = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    line.strip_suffix(b"\r").unwrap_or(line)
}

// =============================================================================
// Read Payload Encoding/Decoding
// =============================================================================

/// Copy a found value plus its terminator into `buffer`
///
/// Returns the number of bytes written. A buffer that cannot hold the
/// whole value and terminator is a `CopyFault`; nothing is written.
pub fn encode_value(value: &[u8], buffer: &mut [u8]) -> Result<usize> {
    let needed = value.len() + 1;
    if buffer.len() < needed {
        return Err(IctError::CopyFault {
            needed,
            available: buffer.len(),
        });
    }

    buffer[..value.len()].copy_from_slice(value);
    buffer[value.len()] = TERMINATOR;
    Ok(needed)
}

/// Write the "no value" marker into `buffer`
///
/// Returns the number of bytes written; a short buffer gets a shorter
/// marker instead of a fault.
pub fn encode_missing(buffer: &mut [u8]) -> usize {
    let len = buffer.len().min(MISSING_MARKER.len());
    buffer[..len].copy_from_slice(&MISSING_MARKER[..len]);
    len
}

/// Extract the value from a read buffer
///
/// Returns `None` for the missing marker or an all-zero buffer.
pub fn decode_value(buffer: &[u8]) -> Option<&[u8]> {
    let end = buffer
        .iter()
        .position(|b| *b == TERMINATOR)
        .unwrap_or(buffer.len());

    if end == 0 {
        None
    } else {
        Some(&buffer[..end])
    }
}
