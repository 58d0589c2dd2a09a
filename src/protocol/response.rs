//! Response definitions
//!
//! `read` carries its outcome in the numeric return value.

/// Numeric result of a read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReadStatus {
    /// No value: no pending GET, empty table, or key absent
    Missing = 0,

    /// The pending key was found and its value copied out
    Found = 1,
}

impl ReadStatus {
    /// The value `read` returns across the channel
    pub fn code(self) -> usize {
        self as usize
    }
}
