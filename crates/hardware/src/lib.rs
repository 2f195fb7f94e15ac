//! Set-associative cache simulator library.
//!
//! This crate replays memory-address traces against a 64-line cache and reports
//! how many accesses hit. It implements the following:
//! 1. **Core:** Address decoding and the set-associative cache with timestamp LRU.
//! 2. **Configuration:** Associativity modes, their geometry, and the run selector.
//! 3. **Simulation:** Trace reading, multi-mode driving, and verbose trace output.
//! 4. **Statistics:** Hit/miss counters and the end-of-run summary.

/// Common types and constants (addresses, block size, errors).
pub mod common;
/// Simulator configuration (modes, geometry, selector, JSON loading).
pub mod config;
/// Cache core (decoder, cache, observers).
pub mod core;
/// Trace reader, driver, and verbose reporter.
pub mod sim;
/// Hit/miss statistics and summary reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Cache type; construct with `Cache::new` or `Cache::for_mode`.
pub use crate::core::Cache;
/// Trace driver over one or all modes.
pub use crate::sim::Simulator;
