//! Simulation statistics collection and reporting.
//!
//! This module tracks hit/miss counters and renders the end-of-run summary. It
//! provides:
//! 1. **Counters:** A caller-owned `CacheStats` accumulator updated by every touch.
//! 2. **Ratios:** Hit and miss ratios over the replayed addresses.
//! 3. **Reports:** Per-mode result blocks, printable as text or JSON.

use std::io::{self, Write};

use serde::Serialize;

use crate::config::CacheMode;
use crate::core::Outcome;

/// Separator line framing every report block and verbose trace record.
pub const SEPARATOR: &str = "-----------------------------------------------";

/// Hit/miss accumulator for one cache.
///
/// After N touches, `hits + misses == N`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that installed their block.
    pub misses: u64,
}

impl CacheStats {
    /// Creates a zeroed accumulator.
    pub const fn new() -> Self {
        Self { hits: 0, misses: 0 }
    }

    /// Counts one access.
    pub const fn record(&mut self, outcome: &Outcome) {
        if outcome.is_hit() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    /// Number of accesses counted.
    pub const fn total(&self) -> u64 {
        self.hits + self.misses
    }

    /// `hits / total`, or 0 when nothing was counted.
    pub fn hit_ratio(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    /// `1 - hit_ratio`, or 0 when nothing was counted.
    ///
    /// The empty case breaks `hit_ratio + miss_ratio == 1`: with no accesses
    /// both ratios are 0, so an empty trace reports `0.000000 hr 0.000000 mr`.
    pub fn miss_ratio(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            _ => 1.0 - self.hit_ratio(),
        }
    }
}

/// Final counters of one cache configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeReport {
    /// Mode the cache was built for.
    pub mode: CacheMode,
    /// Hit count.
    pub hits: u64,
    /// Miss count.
    pub misses: u64,
    /// Addresses replayed.
    pub addresses: u64,
    /// `hits / addresses`.
    pub hit_ratio: f64,
    /// `1 - hit_ratio`.
    pub miss_ratio: f64,
}

impl ModeReport {
    /// Builds a report block from a mode's counters.
    pub fn new(mode: CacheMode, stats: &CacheStats) -> Self {
        Self {
            mode,
            hits: stats.hits,
            misses: stats.misses,
            addresses: stats.total(),
            hit_ratio: stats.hit_ratio(),
            miss_ratio: stats.miss_ratio(),
        }
    }

    fn write_block<W: Write + ?Sized>(&self, out: &mut W, titled: bool) -> io::Result<()> {
        if titled {
            writeln!(out, "{}", self.mode.title())?;
        }
        writeln!(out, "{SEPARATOR}")?;
        writeln!(
            out,
            "Hits: {}; misses: {}; addresses: {}",
            self.hits, self.misses, self.addresses
        )?;
        writeln!(out, "{:.6} hr {:.6} mr", self.hit_ratio, self.miss_ratio)?;
        writeln!(out, "{SEPARATOR}")
    }
}

/// Results of a whole run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Name of the replayed trace (`-` for standard input).
    pub trace: String,
    /// Records replayed.
    pub addresses: u64,
    /// Host wall-clock time spent replaying, in seconds.
    pub host_seconds: f64,
    /// One block per active configuration, in mode order.
    pub modes: Vec<ModeReport>,
}

impl RunReport {
    /// Writes the text summary.
    ///
    /// Blocks are titled when more than one mode ran, and adjacent blocks are
    /// separated by an extra separator line.
    pub fn write_summary<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        let titled = self.modes.len() > 1;
        for (i, block) in self.modes.iter().enumerate() {
            if i > 0 {
                writeln!(out, "{SEPARATOR}")?;
            }
            block.write_block(out, titled)?;
        }
        writeln!(out, "Time Elapsed: {:.6}", self.host_seconds)
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
