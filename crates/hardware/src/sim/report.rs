//! Text rendering of the run header and the verbose per-access trace.
//!
//! The summary block itself lives in [`crate::stats`]; this module covers what is
//! printed before and during the replay.

use std::io::{self, Write};

use crate::common::constants::BLOCK_BYTES;
use crate::config::CacheMode;
use crate::core::cache::observer::{AccessObserver, TouchEvent};
use crate::core::{Outcome, Placement};
use crate::stats::SEPARATOR;

/// Writes the lines printed at the start of every text run.
pub fn write_preamble<W: Write + ?Sized>(out: &mut W, trace: &str, verbose: bool) -> io::Result<()> {
    writeln!(out, "{trace}")?;
    writeln!(out, "verbosity {}", u8::from(verbose))
}

/// Writes the masks and shape of `mode`, printed before a verbose trace.
pub fn write_mode_header<W: Write + ?Sized>(out: &mut W, mode: CacheMode) -> io::Result<()> {
    let geometry = mode.geometry();
    writeln!(out, "tagmask {:#x}", geometry.tag_mask())?;
    writeln!(out, "setmask {:#x}", geometry.set_mask)?;
    writeln!(out, "mode = {}", mode.description())?;
    writeln!(
        out,
        "{} blocks, {} bytes in block; {} {}, {} line per set",
        geometry.capacity(),
        BLOCK_BYTES,
        geometry.sets,
        if geometry.sets == 1 { "set" } else { "sets" },
        geometry.degree
    )
}

/// Writes one verbose trace record.
pub fn write_event<W: Write + ?Sized>(out: &mut W, event: &TouchEvent) -> io::Result<()> {
    writeln!(
        out,
        "D{:08}: addr {} looking for tag 0x{:06x} in set 0x{:02x}",
        event.access, event.address, event.tag, event.set_index
    )?;
    writeln!(out)?;
    writeln!(out, "State of Set 0x{:02x}:", event.set_index)?;
    for (i, line) in event.lines.iter().enumerate() {
        writeln!(
            out,
            "line 0x{:02x} V={} tag 0x{:07x} last_touch={:07}",
            i,
            u8::from(line.valid),
            line.tag,
            line.last_touched
        )?;
    }
    writeln!(out)?;
    match event.outcome {
        Outcome::Hit { line } => writeln!(
            out,
            "Found it in line 0x{line:x}.  Hit! Updating last_touch to {}",
            event.access
        )?,
        Outcome::Miss {
            line,
            placement: Placement::Empty,
        } => writeln!(
            out,
            "Miss! Found empty line 0x{line:x}; adding block there; setting last_touch to {}",
            event.access
        )?,
        Outcome::Miss {
            line,
            placement: Placement::Evicted,
        } => writeln!(
            out,
            "Miss! Evicting line 0x{line:x}; adding block there; setting last_touch to {}",
            event.access
        )?,
    }
    writeln!(out, "{SEPARATOR}")
}

/// Observer that renders every access as a verbose trace record.
///
/// The first write error is kept and later events are dropped; retrieve it with
/// [`VerboseTrace::finish`].
#[derive(Debug)]
pub struct VerboseTrace<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> VerboseTrace<W> {
    /// Renders into `out`.
    pub const fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flushes and returns the writer, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> AccessObserver for VerboseTrace<W> {
    fn enabled(&self) -> bool {
        self.error.is_none()
    }

    fn on_access(&mut self, event: &TouchEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = write_event(&mut self.out, event) {
            self.error = Some(e);
        }
    }
}
