//! Set-Associative Cache Model.
//!
//! This module implements the cache storage and its single mutating operation,
//! `touch`. A cache is a fixed grid of sets, each holding a fixed number of
//! lines. Every line records a validity bit, a tag, and the access counter of its
//! most recent touch.
//!
//! # Replacement
//!
//! Victim selection is timestamp LRU over the scanned lines: the line with the
//! smallest `last_touched` wins and the lowest index breaks ties. Invalid lines
//! start at `last_touched = 0`, so the same rule also picks the first empty line.
//! The rule ignores the valid bit; only a hit pre-empts it.
//!
//! # Performance
//!
//! - **Time Complexity:** `touch()` is O(W), W = lines scanned (at most 64)
//! - **Space Complexity:** O(S × W)

/// Address decoding into tag and set index.
pub mod decoder;

/// Per-access trace events and observers.
pub mod observer;

use std::collections::TryReserveError;

use serde::Serialize;

use self::decoder::{Decoded, decode};
use self::observer::{AccessObserver, NullObserver, TouchEvent};
use crate::common::{Addr, SimError, SimResult};
use crate::config::CacheMode;
use crate::stats::CacheStats;

/// Cache line entry containing validity, tag, and recency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheLine {
    /// Whether the line holds a block.
    pub valid: bool,
    /// Tag of the resident block. Meaningful only when `valid`.
    pub tag: u32,
    /// Access counter of the most recent touch; 0 if never touched.
    pub last_touched: u64,
}

/// How a miss obtained its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Placement {
    /// The victim line was invalid.
    Empty,
    /// A resident block was replaced.
    Evicted,
}

/// Result of a single access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// The block was resident in `line`.
    Hit {
        /// Line index within the set.
        line: usize,
    },
    /// The block was installed into `line`.
    Miss {
        /// Line index within the set.
        line: usize,
        /// Whether the line was empty or evicted.
        placement: Placement,
    },
}

impl Outcome {
    /// Returns `true` for a hit.
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    /// Line index the access resolved to.
    pub const fn line(&self) -> usize {
        match *self {
            Self::Hit { line } | Self::Miss { line, .. } => line,
        }
    }
}

/// Result of scanning one set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Hit(usize),
    Miss { victim: usize },
}

/// One set: a fixed, index-addressed run of lines.
#[derive(Debug, Clone)]
struct CacheSet {
    lines: Vec<CacheLine>,
}

impl CacheSet {
    fn new(lines_per_set: usize) -> Result<Self, TryReserveError> {
        let mut lines = Vec::new();
        lines.try_reserve_exact(lines_per_set)?;
        lines.resize(lines_per_set, CacheLine::default());
        Ok(Self { lines })
    }

    /// Scans the first `degree` lines for `tag`.
    ///
    /// Stops at the first valid line with a matching tag. Otherwise returns the
    /// first line holding the smallest `last_touched`.
    fn lookup(&self, tag: u32, degree: usize) -> Lookup {
        let lines = &self.lines[..degree];
        let mut victim = 0;
        for (i, line) in lines.iter().enumerate() {
            if line.valid && line.tag == tag {
                return Lookup::Hit(i);
            }
            if line.last_touched < lines[victim].last_touched {
                victim = i;
            }
        }
        Lookup::Miss { victim }
    }
}

/// Set-associative cache with timestamp LRU replacement.
///
/// Created fully allocated with every line invalid. Mutated only through
/// [`Cache::touch`]. Dropping the cache releases every set and line at once.
#[derive(Debug, Clone)]
pub struct Cache {
    sets: Vec<CacheSet>,
    lines_per_set: usize,
}

impl Cache {
    /// Creates a cache of `sets` sets with `lines_per_set` lines each.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidGeometry`] if either dimension is zero.
    /// - [`SimError::Allocation`] if line storage cannot be reserved. Storage
    ///   reserved before the failure is released.
    pub fn new(sets: usize, lines_per_set: usize) -> SimResult<Self> {
        if sets == 0 || lines_per_set == 0 {
            return Err(SimError::InvalidGeometry {
                sets,
                lines_per_set,
            });
        }
        let alloc_err = |_: TryReserveError| SimError::Allocation {
            sets,
            lines_per_set,
        };

        let mut storage = Vec::new();
        storage.try_reserve_exact(sets).map_err(alloc_err)?;
        for _ in 0..sets {
            storage.push(CacheSet::new(lines_per_set).map_err(alloc_err)?);
        }

        tracing::debug!(sets, lines_per_set, "cache constructed");
        Ok(Self {
            sets: storage,
            lines_per_set,
        })
    }

    /// Creates a cache shaped for `mode`.
    pub fn for_mode(mode: CacheMode) -> SimResult<Self> {
        let geometry = mode.geometry();
        Self::new(geometry.sets, geometry.degree)
    }

    /// Number of sets.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Number of lines in each set.
    pub const fn lines_per_set(&self) -> usize {
        self.lines_per_set
    }

    /// Total line capacity.
    pub fn capacity(&self) -> usize {
        self.sets.len() * self.lines_per_set
    }

    /// Lines of set `set_index`, or `None` if out of range.
    pub fn set(&self, set_index: usize) -> Option<&[CacheLine]> {
        self.sets.get(set_index).map(|set| set.lines.as_slice())
    }

    /// Number of valid lines across all sets.
    pub fn valid_lines(&self) -> usize {
        self.sets
            .iter()
            .flat_map(|set| set.lines.iter())
            .filter(|line| line.valid)
            .count()
    }

    /// Checks whether the block holding `addr` is resident, without touching it.
    pub fn contains(&self, mode: CacheMode, addr: Addr) -> bool {
        let Decoded {
            tag,
            set_index,
            degree,
        } = decode(mode, addr);
        self.sets.get(set_index).is_some_and(|set| {
            set.lines
                .iter()
                .take(degree)
                .any(|line| line.valid && line.tag == tag)
        })
    }

    /// Records one access to `addr`.
    ///
    /// On a hit the line's `last_touched` becomes `access`. On a miss the LRU
    /// line of the set receives the block. Exactly one of `stats.hits` and
    /// `stats.misses` is incremented.
    ///
    /// `access` must increase across calls for LRU order to be meaningful; the
    /// cache does not check this.
    ///
    /// # Errors
    ///
    /// [`SimError::GeometryMismatch`] if the cache was built for a different
    /// mode and cannot hold the decoded set or degree. Nothing is mutated.
    pub fn touch(
        &mut self,
        mode: CacheMode,
        addr: Addr,
        access: u64,
        stats: &mut CacheStats,
    ) -> SimResult<Outcome> {
        self.touch_observed(mode, addr, access, stats, &mut NullObserver)
    }

    /// Same as [`Cache::touch`], reporting a [`TouchEvent`] to `observer`.
    pub fn touch_observed<O>(
        &mut self,
        mode: CacheMode,
        addr: Addr,
        access: u64,
        stats: &mut CacheStats,
        observer: &mut O,
    ) -> SimResult<Outcome>
    where
        O: AccessObserver + ?Sized,
    {
        let Decoded {
            tag,
            set_index,
            degree,
        } = decode(mode, addr);
        if degree > self.lines_per_set || set_index >= self.sets.len() {
            return Err(SimError::GeometryMismatch {
                set_index,
                degree,
                sets: self.sets.len(),
                lines_per_set: self.lines_per_set,
            });
        }

        let set = &mut self.sets[set_index];
        let lookup = set.lookup(tag, degree);
        let scanned = match lookup {
            Lookup::Hit(line) => line + 1,
            Lookup::Miss { .. } => degree,
        };
        let snapshot = observer
            .enabled()
            .then(|| set.lines[..scanned].to_vec());

        let outcome = match lookup {
            Lookup::Hit(line) => {
                set.lines[line].last_touched = access;
                Outcome::Hit { line }
            }
            Lookup::Miss { victim } => {
                let slot = &mut set.lines[victim];
                let placement = if slot.valid {
                    Placement::Evicted
                } else {
                    Placement::Empty
                };
                *slot = CacheLine {
                    valid: true,
                    tag,
                    last_touched: access,
                };
                Outcome::Miss {
                    line: victim,
                    placement,
                }
            }
        };
        stats.record(&outcome);

        tracing::trace!(
            access,
            addr = %addr,
            tag,
            set_index,
            hit = outcome.is_hit(),
            line = outcome.line(),
            "cache touch"
        );

        if let Some(lines) = snapshot {
            observer.on_access(&TouchEvent {
                access,
                address: addr,
                tag,
                set_index,
                lines,
                outcome,
            });
        }
        Ok(outcome)
    }
}
