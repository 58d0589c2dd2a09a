//! # ictkv
//!
//! A small key-value store driven through a byte-stream device interface:
//! - One session at a time, acquired with a non-blocking open
//! - Requests written as `opcode|key|value` lines
//! - Fixed-capacity table with duplicate rejection and compacting delete
//! - Lookups deferred from the GET write to the following read
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Client (shell / replay / embedder)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ open / write / read / close
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Session Gate (try-lock)                     │
//! │                   one Session at a time                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Codec    │          │   Engine    │
//!   │ (protocol)  │─────────►│   (Store)   │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │    Table    │
//!                           │ (50 slots)  │
//!                           └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use ictkv::{Config, Engine};
//!
//! let engine = Engine::new(Config::default()).unwrap();
//!
//! let mut session = engine.open().unwrap();
//! assert_eq!(session.write(b"0|color|blue"), 12);
//! assert_eq!(session.write(b"1|color"), 7);
//!
//! let mut buffer = [0u8; 64];
//! assert_eq!(session.read(&mut buffer).unwrap(), 1);
//! assert_eq!(ictkv::protocol::decode_value(&buffer), Some(&b"blue"[..]));
//! session.close();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod table;
pub mod protocol;
pub mod session;
pub mod engine;
pub mod replay;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{IctError, Result};
pub use config::{Config, OverflowPolicy};
pub use engine::Engine;
pub use session::Session;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ictkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
