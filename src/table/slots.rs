//! Table implementation
//!
//! Bounded slot array with linear lookup and compacting removal.

use crate::config::{Config, OverflowPolicy};
use crate::error::{IctError, Result};

use super::Entry;

/// Fixed-capacity key/value table
///
/// Invariants:
/// - slots `0..len()` are occupied, with no gaps
/// - no two occupied slots hold the same key
/// - `len() <= capacity()`
#[derive(Debug)]
pub struct Table {
    /// Occupied slots in insertion order
    slots: Vec<Entry>,

    /// Maximum number of occupied slots
    capacity: usize,

    /// What `insert` does once `slots.len() == capacity`
    overflow_policy: OverflowPolicy,
}

impl Table {
    /// Create an empty table
    pub fn new(capacity: usize, overflow_policy: OverflowPolicy) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            overflow_policy,
        }
    }

    /// Create an empty table sized and configured from `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.capacity, config.overflow_policy)
    }

    /// Find the slot holding `key`
    ///
    /// Scans slots in order and returns the first exact byte match.
    pub fn find(&self, key: &[u8]) -> Option<usize> {
        self.slots.iter().position(|entry| entry.key == *key)
    }

    /// Insert a new entry at the end of the occupied prefix
    ///
    /// Returns the slot index the entry landed in. Fails with `Duplicate`
    /// when the key is already present; that check runs first, so a
    /// duplicate PUSH against a full table never triggers the overflow
    /// policy.
    pub fn insert(&mut self, entry: Entry) -> Result<usize> {
        if self.find(entry.key.as_bytes()).is_some() {
            return Err(IctError::Duplicate);
        }

        if self.is_full() {
            match self.overflow_policy {
                OverflowPolicy::Reset => {
                    tracing::warn!(
                        "Table full at {} entries, discarding all entries",
                        self.capacity
                    );
                    self.slots.clear();
                }
                OverflowPolicy::Reject => return Err(IctError::Full),
                OverflowPolicy::EvictOldest => {
                    let evicted = self.slots.remove(0);
                    tracing::warn!("Table full, evicted oldest key: {}", evicted.key);
                }
            }
        }

        self.slots.push(entry);
        Ok(self.slots.len() - 1)
    }

    /// Replace the entry at `index` in place
    ///
    /// Callers pass the index returned by `find` for the same key, which
    /// keeps keys unique.
    pub fn overwrite(&mut self, index: usize, entry: Entry) -> Result<()> {
        let slot = self.slots.get_mut(index).ok_or(IctError::NotFound)?;
        *slot = entry;
        Ok(())
    }

    /// Remove the entry at `index`, shifting every later entry left by one
    pub fn remove(&mut self, index: usize) -> Result<Entry> {
        if index >= self.slots.len() {
            return Err(IctError::NotFound);
        }
        Ok(self.slots.remove(index))
    }

    /// Get the entry at `index`
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.slots.get(index)
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow_policy
    }

    /// Highest occupied slot, `None` when empty
    pub fn max_index(&self) -> Option<usize> {
        self.slots.len().checked_sub(1)
    }

    /// Iterate occupied slots in order
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.slots.iter()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
