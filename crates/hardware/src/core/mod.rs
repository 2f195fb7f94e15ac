//! Cache core.
//!
//! This module contains the cache data structure, the address decoder it uses,
//! and the observer interface through which per-access trace events leave the
//! core.

/// Set-associative cache with LRU replacement.
pub mod cache;

pub use self::cache::{Cache, CacheLine, Outcome, Placement};
