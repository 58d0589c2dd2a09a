//! Table Module
//!
//! Fixed-capacity key/value storage scanned in slot order.
//!
//! ## Responsibilities
//! - Keep occupied slots contiguous from slot 0
//! - Reject duplicate keys at insert time
//! - Apply the configured overflow policy when every slot is taken
//! - Compact on remove (later entries shift left by one)
//!
//! ## Data Structure Choice
//! A `Vec<Entry>` bounded by `capacity`, searched linearly:
//! - n is at most a few dozen, so a scan beats maintaining an index
//! - `Vec::remove` gives the left-shift compaction for free
//! - Insertion order is observable and preserved

mod slots;

pub use slots::Table;

use std::fmt;

use bytes::Bytes;

use crate::error::{IctError, Result};

/// Default number of slots in a table
pub const MAX_ELEMENT: usize = 50;

/// Longest key or value accepted, in bytes
pub const MAX_FIELD_LEN: usize = 49;

/// Separator between request fields; never allowed inside a field
pub const DELIMITER: u8 = b'|';

/// A validated key or value: 1..=49 bytes, no delimiter, no NUL
///
/// Oversized input is rejected rather than truncated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field(Bytes);

impl Field {
    /// Validate and copy `bytes` into a new field
    pub fn new(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(Bytes::copy_from_slice(bytes))
    }

    /// Validate an already-owned buffer without copying it
    pub fn from_bytes(bytes: Bytes) -> Result<Self> {
        if bytes.is_empty() {
            return Err(IctError::Malformed("empty field".to_string()));
        }
        if bytes.len() > MAX_FIELD_LEN {
            return Err(IctError::Malformed(format!(
                "field of {} bytes exceeds limit of {}",
                bytes.len(),
                MAX_FIELD_LEN
            )));
        }
        if bytes.contains(&DELIMITER) {
            return Err(IctError::Malformed("field contains '|'".to_string()));
        }
        if bytes.contains(&0) {
            return Err(IctError::Malformed("field contains NUL".to_string()));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get a cheap clone of the underlying buffer
    pub fn to_bytes(&self) -> Bytes {
        self.0.clone()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl PartialEq<[u8]> for Field {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl AsRef<[u8]> for Field {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// One stored key/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: Field,
    pub value: Field,
}

impl Entry {
    pub fn new(key: Field, value: Field) -> Self {
        Self { key, value }
    }
}
