//! Session Gate
//!
//! Non-blocking exclusive access to shared state.

use parking_lot::{Mutex, MutexGuard};

/// Grants at most one holder at a time, without queueing
///
/// `try_acquire` either hands out the guard immediately or returns `None`;
/// contending callers retry on their own and get no ordering guarantee.
#[derive(Debug, Default)]
pub struct SessionGate<T> {
    state: Mutex<T>,
}

impl<T> SessionGate<T> {
    /// Create an unlocked gate around `state`
    pub fn new(state: T) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Take the gate if nobody holds it
    pub fn try_acquire(&self) -> Option<MutexGuard<'_, T>> {
        self.state.try_lock()
    }

    /// Whether a holder currently exists
    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    /// Consume the gate, returning the state
    pub fn into_inner(self) -> T {
        self.state.into_inner()
    }
}
