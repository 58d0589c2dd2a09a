//! Configuration for ictkv
//!
//! Centralized configuration with defaults matching the original device.

use std::fmt;
use std::str::FromStr;

use crate::error::{IctError, Result};
use crate::table::MAX_ELEMENT;

/// Main configuration for an ictkv engine
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Device Configuration
    // -------------------------------------------------------------------------
    /// Name the device is known by (appears in log lines)
    pub device_name: String,

    // -------------------------------------------------------------------------
    // Table Configuration
    // -------------------------------------------------------------------------
    /// Number of entry slots in the table
    pub capacity: usize,

    /// What a PUSH does when every slot is occupied
    pub overflow_policy: OverflowPolicy,
}

/// Behavior of PUSH on a full table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Discard every entry, then insert into the now-empty table
    #[default]
    Reset,

    /// Refuse the insert; the write returns 0
    Reject,

    /// Drop the oldest entry (slot 0), then append
    EvictOldest,
}

impl FromStr for OverflowPolicy {
    type Err = IctError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "reset" => Ok(OverflowPolicy::Reset),
            "reject" => Ok(OverflowPolicy::Reject),
            "evict-oldest" => Ok(OverflowPolicy::EvictOldest),
            other => Err(IctError::Config(format!(
                "unknown overflow policy '{}' (expected reset, reject or evict-oldest)",
                other
            ))),
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OverflowPolicy::Reset => "reset",
            OverflowPolicy::Reject => "reject",
            OverflowPolicy::EvictOldest => "evict-oldest",
        };
        f.write_str(name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_name: "ictredis".to_string(),
            capacity: MAX_ELEMENT,
            overflow_policy: OverflowPolicy::Reset,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the config for values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(IctError::Config("capacity must be at least 1".to_string()));
        }
        if self.device_name.is_empty() {
            return Err(IctError::Config("device name must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the device name
    pub fn device_name(mut self, name: impl Into<String>) -> Self {
        self.config.device_name = name.into();
        self
    }

    /// Set the number of table slots
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Set the overflow policy
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.config.overflow_policy = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
