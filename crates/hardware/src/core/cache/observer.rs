//! Access observation hooks.
//!
//! A [`TouchEvent`] describes one access: what was looked up, the state of every
//! scanned line before the cache mutated it, and the outcome. Events are only
//! built when the observer asks for them, so an unobserved run pays nothing.

use serde::Serialize;

use super::{CacheLine, Outcome};
use crate::common::Addr;

/// Snapshot of a single access, taken before the cache is mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TouchEvent {
    /// Access counter of this record (the LRU clock value).
    pub access: u64,
    /// Address replayed.
    pub address: Addr,
    /// Decoded tag.
    pub tag: u32,
    /// Decoded set index.
    pub set_index: usize,
    /// Lines scanned, in index order. Stops at the hit line on a hit.
    pub lines: Vec<CacheLine>,
    /// Result of the access.
    pub outcome: Outcome,
}

/// Receives a [`TouchEvent`] for every access of an observed cache.
pub trait AccessObserver {
    /// Whether events should be built at all.
    fn enabled(&self) -> bool {
        true
    }

    /// Called once per access, after the outcome is known.
    fn on_access(&mut self, event: &TouchEvent);
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl AccessObserver for NullObserver {
    fn enabled(&self) -> bool {
        false
    }

    fn on_access(&mut self, _event: &TouchEvent) {}
}

/// Collects events in memory.
impl AccessObserver for Vec<TouchEvent> {
    fn on_access(&mut self, event: &TouchEvent) {
        self.push(event.clone());
    }
}
