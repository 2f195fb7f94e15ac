//! Simulator error definitions.
//!
//! This module defines the error taxonomy of the simulator. It provides:
//! 1. **Configuration Errors:** Invalid modes, selectors, and mismatched geometry.
//! 2. **Resource Errors:** Allocation failure while building a cache.
//! 3. **Trace Errors:** I/O failures and malformed records from the trace reader.
//!
//! The core never terminates the process; every failure is returned to the caller,
//! which decides whether to abort.

use std::io;

use thiserror::Error;

/// Errors produced while building or driving a cache.
#[derive(Debug, Error)]
pub enum SimError {
    /// A raw mode number outside `0..=3` was converted to a cache mode.
    #[error("invalid cache mode: {0} (must be in range 0-3)")]
    InvalidMode(u8),

    /// A raw cache-type selector outside `0..=4` was supplied.
    #[error("invalid cache_type: {0} (must be range 0-4)")]
    InvalidSelector(i64),

    /// The decoded coordinates do not fit the cache being touched.
    ///
    /// Raised when a cache is driven with a mode whose geometry differs from the
    /// one it was built with. Continuing would misclassify every access.
    #[error(
        "invalid cache type for this cache: set {set_index} with {degree} lines does not fit \
         {sets} sets of {lines_per_set} lines"
    )]
    GeometryMismatch {
        /// Decoded set index.
        set_index: usize,
        /// Decoded associativity degree.
        degree: usize,
        /// Number of sets in the cache.
        sets: usize,
        /// Number of lines in each set of the cache.
        lines_per_set: usize,
    },

    /// A cache was requested with a zero dimension.
    #[error("cache geometry must be non-zero: {sets} sets, {lines_per_set} lines per set")]
    InvalidGeometry {
        /// Requested number of sets.
        sets: usize,
        /// Requested number of lines per set.
        lines_per_set: usize,
    },

    /// Line storage could not be allocated.
    #[error("failed to allocate cache storage ({sets} sets, {lines_per_set} lines per set)")]
    Allocation {
        /// Requested number of sets.
        sets: usize,
        /// Requested number of lines per set.
        lines_per_set: usize,
    },

    /// Verbose tracing was requested while running all modes at once.
    #[error("cannot use verbose output for all cache files simultaneously")]
    VerboseWithAll,

    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The trace could not be read.
    #[error(transparent)]
    Trace(#[from] TraceError),
}

/// Errors produced by the trace reader.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("error reading trace: {0}")]
    Io(#[from] io::Error),

    /// A non-blank line was not an `<access-type> <hex-address>` pair.
    #[error("malformed trace record at line {line}: {content:?}")]
    Malformed {
        /// One-based line number.
        line: usize,
        /// The offending line, trimmed.
        content: String,
    },
}

/// Result alias used throughout the simulator.
pub type SimResult<T> = Result<T, SimError>;
