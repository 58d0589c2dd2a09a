//! Request script replay
//!
//! Drives an engine from a script of wire requests, one per line.
//!
//! ## Script Format
//! ```text
//! # comments and blank lines are skipped
//! 0|alpha|one
//! 1|alpha
//! 3|alpha
//! ```
//!
//! Each request runs in its own session: open, write, read (GET only),
//! close. One report line is written per request:
//! ```text
//! 0|alpha|one	write=11
//! 1|alpha	write=7	read=1	value=one
//! ```

use std::io::{BufRead, Write};

use crate::engine::Engine;
use crate::error::Result;
use crate::protocol::{decode_command, decode_value, Opcode};
use crate::table::MAX_FIELD_LEN;

/// Totals for one replay run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Requests written
    pub requests: usize,

    /// Writes that returned the request length
    pub accepted: usize,

    /// Writes that returned 0
    pub rejected: usize,

    /// Reads that returned 1
    pub found: usize,
}

/// Replay every request in `input`, reporting to `output`
///
/// Lines are raw bytes; only the line ending is removed before the
/// request is written, so trailing spaces and non-UTF-8 bytes reach the
/// session unchanged. A busy gate or a copy fault aborts the run with
/// that error.
pub fn replay<R: BufRead, W: Write>(engine: &Engine, input: R, mut output: W) -> Result<ReplayStats> {
    let mut stats = ReplayStats::default();
    let mut buffer = [0u8; MAX_FIELD_LEN + 1];

    for line in input.split(b'\n') {
        let line = line?;
        let request = line.strip_suffix(b"\r").unwrap_or(&line);
        if is_skipped(request) {
            continue;
        }

        let mut session = engine.open()?;
        stats.requests += 1;

        let written = session.write(request);
        if written > 0 {
            stats.accepted += 1;
        } else {
            stats.rejected += 1;
        }
        write!(output, "{}\twrite={}", String::from_utf8_lossy(request), written)?;

        if is_get(request) {
            buffer.fill(0);
            let status = session.read(&mut buffer)?;
            if status > 0 {
                stats.found += 1;
            }
            let value = decode_value(&buffer).unwrap_or_default();
            write!(
                output,
                "\tread={}\tvalue={}",
                status,
                String::from_utf8_lossy(value)
            )?;
        }

        writeln!(output)?;
        session.close();
    }

    output.flush()?;
    Ok(stats)
}

/// Blank lines and `#` comments
fn is_skipped(request: &[u8]) -> bool {
    request.first() == Some(&b'#') || request.iter().all(u8::is_ascii_whitespace)
}

/// Whether a request decodes as a GET
fn is_get(request: &[u8]) -> bool {
    decode_command(request).ok().map(|command| command.opcode()) == Some(Opcode::Get)
}
