//! Memory trace reader.
//!
//! A trace holds one record per line: a single access-type character and a
//! hexadecimal 32-bit address, separated by whitespace.
//!
//! ```text
//! L 7ff00398
//! S 0x00601040
//! ```
//!
//! Blank lines are skipped. Anything else that is not exactly one such pair is
//! reported as [`TraceError::Malformed`] with its line number.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::common::{Addr, TraceError};

/// Filename that selects standard input.
pub const STDIN_PATH: &str = "-";

/// Access-type character of a record. Carried through but not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccessKind(pub char);

/// One parsed trace record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraceRecord {
    /// Access type.
    pub kind: AccessKind,
    /// Address accessed.
    pub address: Addr,
}

/// Parses a hexadecimal address with an optional `0x`/`0X` prefix.
pub fn parse_hex_addr(token: &str) -> Option<Addr> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().map(Addr::from)
}

/// Parses a single non-blank record line.
pub fn parse_record(line: &str) -> Option<TraceRecord> {
    let mut fields = line.split_whitespace();
    let kind_field = fields.next()?;
    let addr_field = fields.next()?;
    if fields.next().is_some() {
        return None;
    }

    let mut kind_chars = kind_field.chars();
    let kind = kind_chars.next()?;
    if kind_chars.next().is_some() {
        return None;
    }

    Some(TraceRecord {
        kind: AccessKind(kind),
        address: parse_hex_addr(addr_field)?,
    })
}

/// Iterator over the records of a buffered trace.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(TraceError::Io(e))),
            };
            self.line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Some(parse_record(trimmed).ok_or_else(|| TraceError::Malformed {
                line: self.line_no,
                content: trimmed.to_string(),
            }));
        }
    }
}

/// Opens a trace file, or standard input when `path` is `-`.
///
/// # Errors
///
/// [`TraceError::Io`] if the file cannot be opened.
pub fn open(path: &Path) -> Result<TraceReader<Box<dyn BufRead>>, TraceError> {
    let reader: Box<dyn BufRead> = if path.as_os_str() == STDIN_PATH {
        Box::new(io::stdin().lock())
    } else {
        Box::new(BufReader::new(File::open(path)?))
    };
    tracing::debug!(path = %path.display(), "trace opened");
    Ok(TraceReader::new(reader))
}
