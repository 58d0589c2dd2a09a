//! Error types for ictkv
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using IctError
pub type Result<T> = std::result::Result<T, IctError>;

/// Unified error type for ictkv operations
#[derive(Debug, Error)]
pub enum IctError {
    // -------------------------------------------------------------------------
    // Session Errors
    // -------------------------------------------------------------------------
    #[error("Device in use by another session")]
    Busy,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Malformed request: {0}")]
    Malformed(String),

    #[error("No pending lookup: last write was not a GET")]
    NoPendingLookup,

    #[error("Failed to copy {needed} bytes into a buffer of {available}")]
    CopyFault { needed: usize, available: usize },

    // -------------------------------------------------------------------------
    // Table Errors
    // -------------------------------------------------------------------------
    #[error("Key already exists")]
    Duplicate,

    #[error("Key not found")]
    NotFound,

    #[error("Table is full")]
    Full,

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl IctError {
    /// The negative errno a character device would hand back for this error.
    ///
    /// Ordinary negative outcomes (malformed, duplicate, not found, full) are
    /// reported as `0`, the same value `write`/`read` return for them.
    pub fn errno(&self) -> i32 {
        match self {
            IctError::Busy => -16,
            IctError::CopyFault { .. } => -14,
            IctError::Config(_) => -22,
            IctError::Io(e) => e.raw_os_error().map(|code| -code).unwrap_or(-5),
            IctError::Malformed(_)
            | IctError::NoPendingLookup
            | IctError::Duplicate
            | IctError::NotFound
            | IctError::Full => 0,
        }
    }
}
