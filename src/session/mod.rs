//! Session Module
//!
//! The exclusive channel a client holds between open and close.
//!
//! ## Lifecycle
//! ```text
//!   Engine::open ──► Idle ──write(GET)──► AwaitingRead ──read──► Idle
//!                     │  ▲                    │
//!                     │  └──write(other)──────┘
//!                     └──close──► gate released
//! ```
//!
//! ## Concurrency
//! - Opening is a try-lock on the [`SessionGate`]: it succeeds at once or
//!   fails with `Busy`, it never waits
//! - A `Session` owns the gate's guard, so `write`/`read` need no further
//!   locking; the guard is not `Send`, pinning a session to the thread
//!   that opened it
//! - Closing (or dropping) the session is the only way to release the gate;
//!   there is no lease timeout

mod gate;
mod pending;

pub use gate::SessionGate;
pub use pending::{PendingRequest, SessionState};

use parking_lot::MutexGuard;

use crate::engine::Store;
use crate::error::{IctError, Result};
use crate::protocol::{decode_command, encode_missing, encode_value, ReadStatus};
use crate::table::{Entry, Field};

/// An open channel with exclusive access to the store
pub struct Session<'a> {
    /// Open-counter value at the time this session was opened
    id: u64,

    /// Device name for log lines
    device: &'a str,

    /// Held for the whole session; releasing it unlocks the gate
    store: MutexGuard<'a, Store>,
}

impl<'a> Session<'a> {
    pub(crate) fn new(id: u64, device: &'a str, store: MutexGuard<'a, Store>) -> Self {
        Self { id, device, store }
    }

    /// Get the session id
    pub fn id(&self) -> u64 {
        self.id
    }

    // =========================================================================
    // Channel Operations
    // =========================================================================

    /// Write one encoded request
    ///
    /// Returns the request length when it was accepted and `0` when it
    /// was rejected (malformed, duplicate key, key not found, table full
    /// under the reject policy). Never partial.
    pub fn write(&mut self, request: &[u8]) -> usize {
        match self.submit(request) {
            Ok(_) => request.len(),
            Err(e) => {
                tracing::warn!("{}: Write error on session {}: {}", self.device, self.id, e);
                0
            }
        }
    }

    /// Read the result of a pending GET into `buffer`
    ///
    /// Returns `1` with the value and a terminator in `buffer` when found,
    /// `0` with a zero marker otherwise. A buffer too small for the value
    /// is the only error; the pending GET survives it, so the read can be
    /// retried with a larger buffer.
    pub fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let result = self.store.pending_value();
        self.log_lookup(&result);

        match result {
            Ok(value) => {
                encode_value(value.as_bytes(), buffer).map_err(|e| {
                    tracing::error!(
                        "{}: Failed to send value to session {}: {}",
                        self.device,
                        self.id,
                        e
                    );
                    e
                })?;
                self.store.clear_pending();
                Ok(ReadStatus::Found.code())
            }
            Err(IctError::NotFound) | Err(IctError::NoPendingLookup) => {
                self.store.clear_pending();
                encode_missing(buffer);
                Ok(ReadStatus::Missing.code())
            }
            Err(e) => Err(e),
        }
    }

    /// Release the gate
    pub fn close(self) {
        tracing::info!("{}: Session {} successfully closed", self.device, self.id);
    }

    // =========================================================================
    // Structured Operations
    // =========================================================================

    /// Decode and execute one request, keeping the structured outcome
    ///
    /// Returns the slot the command touched (`None` for GET, whose lookup
    /// is deferred to the next read). A request that fails to decode still
    /// clears any pending lookup.
    pub fn submit(&mut self, request: &[u8]) -> Result<Option<usize>> {
        let command = match decode_command(request) {
            Ok(command) => command,
            Err(e) => {
                self.store.clear_pending();
                return Err(e);
            }
        };

        tracing::trace!("{}: Session {} received {:?}", self.device, self.id, command);
        self.store.execute(command)
    }

    /// Resolve the pending GET against the table, consuming it
    pub fn lookup(&mut self) -> Result<Field> {
        let result = self.store.resolve_pending();
        self.log_lookup(&result);
        result
    }

    fn log_lookup(&self, result: &Result<Field>) {
        match result {
            Ok(value) => tracing::debug!("{}: Request key found with value {}", self.device, value),
            Err(IctError::NotFound) => tracing::warn!("{}: Request key not found", self.device),
            Err(IctError::NoPendingLookup) => {
                tracing::warn!("{}: Need request key first", self.device)
            }
            Err(_) => {}
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Current position in the write/read cycle
    pub fn state(&self) -> SessionState {
        self.store.pending().state()
    }

    /// The request recorded by the last write
    pub fn pending(&self) -> &PendingRequest {
        self.store.pending()
    }

    /// Iterate stored entries in slot order
    pub fn entries(&self) -> std::slice::Iter<'_, Entry> {
        self.store.table().iter()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.store.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.table().is_empty()
    }
}
