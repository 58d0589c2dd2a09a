//! Pending request tracking

use crate::protocol::{Command, Opcode};
use crate::table::Field;

/// Where a session is in its write/read cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No lookup waiting; a read returns the missing marker
    Idle,

    /// A GET was written; the next read resolves it
    AwaitingRead,
}

/// What the last write asked for
///
/// Replaced by every write and consumed by the next read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingRequest {
    mode: Option<Opcode>,
    key: Option<Field>,
    resolved_index: Option<usize>,
}

impl PendingRequest {
    /// Nothing pending
    pub fn idle() -> Self {
        Self::default()
    }

    /// Record `command` as the latest request
    pub fn from_command(command: &Command) -> Self {
        Self {
            mode: Some(command.opcode()),
            key: Some(command.key().clone()),
            resolved_index: None,
        }
    }

    pub fn mode(&self) -> Option<Opcode> {
        self.mode
    }

    pub fn key(&self) -> Option<&Field> {
        self.key.as_ref()
    }

    /// Slot the request touched, once executed (never set for GET)
    pub fn resolved_index(&self) -> Option<usize> {
        self.resolved_index
    }

    pub(crate) fn set_resolved_index(&mut self, index: usize) {
        self.resolved_index = Some(index);
    }

    pub fn state(&self) -> SessionState {
        match self.mode {
            Some(Opcode::Get) => SessionState::AwaitingRead,
            _ => SessionState::Idle,
        }
    }
}
