//! Protocol Module
//!
//! Defines the byte-level protocol spoken over an open session.
//!
//! ## Request Format
//! ASCII fields joined by `|`, optionally followed by one line ending:
//! ```text
//! GET, DELETE:  <opcode>|<key>
//! PUSH, EDIT:   <opcode>|<key>|<value>
//! ```
//!
//! ### Opcodes
//! - 0: PUSH   - insert a new key (rejects duplicates)
//! - 1: GET    - record a lookup, resolved by the next read
//! - 2: EDIT   - replace the value of an existing key
//! - 3: DELETE - remove a key, compacting the table
//!
//! ## Read Payload
//! ```text
//! found:    <value bytes> 0x00
//! missing:  0x00 0x00 0x00 0x00
//! ```
//!
//! No status text ever crosses the channel; outcomes are carried by the
//! numeric return of `write` and `read` (see [`ReadStatus`]).

mod command;
mod response;
mod codec;

pub use command::{Command, Opcode};
pub use response::ReadStatus;
pub use codec::{
    decode_command, decode_value, encode_command, encode_missing, encode_value,
    MISSING_MARKER, TERMINATOR,
};
