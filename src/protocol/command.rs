//! Command definitions
//!
//! Represents decoded requests.

use std::fmt;

use crate::error::IctError;
use crate::table::Field;

/// Request opcodes as they appear on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    Push = 0,
    Get = 1,
    Edit = 2,
    Delete = 3,
}

impl TryFrom<u8> for Opcode {
    type Error = IctError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Opcode::Push),
            1 => Ok(Opcode::Get),
            2 => Ok(Opcode::Edit),
            3 => Ok(Opcode::Delete),
            other => Err(IctError::Malformed(format!("unknown opcode {}", other))),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opcode::Push => "PUSH",
            Opcode::Get => "GET",
            Opcode::Edit => "EDIT",
            Opcode::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// A decoded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert a new key/value pair
    Push { key: Field, value: Field },

    /// Look up a key on the next read
    Get { key: Field },

    /// Replace the value of an existing key
    Edit { key: Field, value: Field },

    /// Remove a key
    Delete { key: Field },
}

impl Command {
    /// Get the opcode
    pub fn opcode(&self) -> Opcode {
        match self {
            Command::Push { .. } => Opcode::Push,
            Command::Get { .. } => Opcode::Get,
            Command::Edit { .. } => Opcode::Edit,
            Command::Delete { .. } => Opcode::Delete,
        }
    }

    /// Get the key every command carries
    pub fn key(&self) -> &Field {
        match self {
            Command::Push { key, .. }
            | Command::Get { key }
            | Command::Edit { key, .. }
            | Command::Delete { key } => key,
        }
    }
}
