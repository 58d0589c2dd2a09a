//! Engine Module
//!
//! The command engine and the gate that serializes access to it.
//!
//! ## Responsibilities
//! - Own the table and the pending request behind a single session gate
//! - Hand out sessions with a non-blocking open
//! - Execute PUSH/GET/EDIT/DELETE against the table
//! - Resolve a pending GET when the session reads

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::Config;
use crate::error::{IctError, Result};
use crate::protocol::Command;
use crate::session::{PendingRequest, Session, SessionGate, SessionState};
use crate::table::{Entry, Field, Table};

/// The key-value device
///
/// ## Concurrency Model: Single Session
///
/// - Any number of threads may call `open` on a shared `&Engine`
/// - Exactly one `Session` exists at a time; other openers get `Busy`
///   immediately and must retry themselves
/// - The session owns the gate's guard, so table access inside a session
///   takes no further locks
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Table and pending request, reachable only through a session
    gate: SessionGate<Store>,

    /// Successful opens since the engine was created
    open_count: AtomicU64,
}

impl Engine {
    /// Create an engine with an empty table
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        tracing::info!(
            "{}: Initializing with {} slots, overflow policy {}",
            config.device_name,
            config.capacity,
            config.overflow_policy
        );

        let store = Store::new(&config);

        Ok(Self {
            config,
            gate: SessionGate::new(store),
            open_count: AtomicU64::new(0),
        })
    }

    /// Open a session
    ///
    /// Fails with `Busy` without waiting if another session is open. The
    /// new session starts with nothing pending.
    pub fn open(&self) -> Result<Session<'_>> {
        let mut store = self.gate.try_acquire().ok_or_else(|| {
            tracing::warn!("{}: Device in use by another session", self.config.device_name);
            IctError::Busy
        })?;

        store.clear_pending();

        let id = self.open_count.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            "{}: Device has been opened {} time(s)",
            self.config.device_name,
            id
        );

        Ok(Session::new(id, &self.config.device_name, store))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Whether a session currently holds the gate
    pub fn is_open(&self) -> bool {
        self.gate.is_locked()
    }

    /// Number of successful opens so far
    pub fn open_count(&self) -> u64 {
        self.open_count.load(Ordering::Relaxed)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// State guarded by the session gate
#[derive(Debug)]
pub struct Store {
    table: Table,
    pending: PendingRequest,
}

impl Store {
    /// Create an empty store
    pub fn new(config: &Config) -> Self {
        Self {
            table: Table::from_config(config),
            pending: PendingRequest::idle(),
        }
    }

    /// Execute a command
    ///
    /// The command replaces the pending request whatever its outcome.
    /// Returns the slot touched, or `None` for GET.
    ///
    /// | command | effect                         | error              |
    /// |---------|--------------------------------|--------------------|
    /// | PUSH    | append entry                   | `Duplicate`/`Full` |
    /// | GET     | record key for the next read   | -                  |
    /// | EDIT    | overwrite entry in place       | `NotFound`         |
    /// | DELETE  | remove entry, compacting       | `NotFound`         |
    pub fn execute(&mut self, command: Command) -> Result<Option<usize>> {
        self.pending = PendingRequest::from_command(&command);

        let index = match command {
            Command::Push { key, value } => {
                tracing::debug!("Received key: {} value: {}", key, value);
                self.table.insert(Entry::new(key, value))?
            }
            Command::Get { key } => {
                tracing::debug!("Received request key: {}", key);
                return Ok(None);
            }
            Command::Edit { key, value } => {
                tracing::debug!("Received edit for key: {} value: {}", key, value);
                let index = self.table.find(key.as_bytes()).ok_or(IctError::NotFound)?;
                self.table.overwrite(index, Entry::new(key, value))?;
                index
            }
            Command::Delete { key } => {
                tracing::debug!("Received delete for key: {}", key);
                let index = self.table.find(key.as_bytes()).ok_or(IctError::NotFound)?;
                self.table.remove(index)?;
                index
            }
        };

        self.pending.set_resolved_index(index);
        Ok(Some(index))
    }

    /// Resolve the pending GET, consuming the pending request
    ///
    /// The key is looked up again here rather than at write time, so a
    /// key deleted in between is reported missing.
    pub fn resolve_pending(&mut self) -> Result<Field> {
        let result = self.pending_value();
        self.clear_pending();
        result
    }

    /// Look up the pending GET without consuming it
    pub fn pending_value(&self) -> Result<Field> {
        match (self.pending.state(), self.pending.key()) {
            (SessionState::AwaitingRead, Some(key)) => {
                let index = self.table.find(key.as_bytes()).ok_or(IctError::NotFound)?;
                self.table
                    .get(index)
                    .map(|entry| entry.value.clone())
                    .ok_or(IctError::NotFound)
            }
            _ => Err(IctError::NoPendingLookup),
        }
    }

    /// Forget any pending request
    pub fn clear_pending(&mut self) {
        self.pending = PendingRequest::idle();
    }

    pub fn pending(&self) -> &PendingRequest {
        &self.pending
    }

    pub fn table(&self) -> &Table {
        &self.table
    }
}
