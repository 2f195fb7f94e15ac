//! Simulator: drives one cache per active mode over an address stream.
//!
//! The simulator owns the access counter that serves as the LRU clock. Every
//! record advances it once, and with the `All` selector the same counter value
//! is handed to each of the four caches in mode order.

use std::time::Duration;

use crate::common::{Addr, FIRST_ACCESS, SimResult, TraceError};
use crate::config::{CacheMode, Config, ModeSelector};
use crate::core::Cache;
use crate::core::cache::observer::{AccessObserver, NullObserver};
use crate::sim::trace::TraceRecord;
use crate::stats::{CacheStats, ModeReport, RunReport};

/// A cache together with the mode it is driven with and its counters.
#[derive(Debug)]
pub struct Lane {
    /// Mode used to decode every access.
    pub mode: CacheMode,
    /// The cache itself.
    pub cache: Cache,
    /// Hit/miss counters of this cache.
    pub stats: CacheStats,
}

/// Top-level simulator: independent caches fed from a single trace.
#[derive(Debug)]
pub struct Simulator {
    lanes: Vec<Lane>,
    next_access: u64,
}

impl Simulator {
    /// Builds one cache per mode of `selector`.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::common::SimError::Allocation`] from cache construction.
    pub fn new(selector: ModeSelector) -> SimResult<Self> {
        let lanes = selector
            .modes()
            .into_iter()
            .map(|mode| -> SimResult<Lane> {
                Ok(Lane {
                    mode,
                    cache: Cache::for_mode(mode)?,
                    stats: CacheStats::new(),
                })
            })
            .collect::<SimResult<Vec<_>>>()?;
        tracing::debug!(?selector, lanes = lanes.len(), "simulator ready");
        Ok(Self {
            lanes,
            next_access: FIRST_ACCESS,
        })
    }

    /// Validates `config` and builds the caches it selects.
    pub fn from_config(config: &Config) -> SimResult<Self> {
        config.validate()?;
        Self::new(config.cache.selector)
    }

    /// Active lanes, in mode order.
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Counters of the cache driven with `mode`, if it is active.
    pub fn stats(&self, mode: CacheMode) -> Option<&CacheStats> {
        self.lanes
            .iter()
            .find(|lane| lane.mode == mode)
            .map(|lane| &lane.stats)
    }

    /// Number of records replayed so far.
    pub const fn accesses(&self) -> u64 {
        self.next_access - FIRST_ACCESS
    }

    /// Replays one address against every active cache.
    pub fn step(&mut self, addr: Addr) -> SimResult<()> {
        self.step_observed(addr, &mut NullObserver)
    }

    /// Same as [`Simulator::step`], reporting trace events to `observer`.
    pub fn step_observed<O>(&mut self, addr: Addr, observer: &mut O) -> SimResult<()>
    where
        O: AccessObserver + ?Sized,
    {
        let access = self.next_access;
        for lane in &mut self.lanes {
            let _ = lane
                .cache
                .touch_observed(lane.mode, addr, access, &mut lane.stats, observer)?;
        }
        self.next_access += 1;
        Ok(())
    }

    /// Replays a whole record stream, stopping at the first error.
    ///
    /// Returns the number of records replayed by this call.
    pub fn run<I, O>(&mut self, records: I, observer: &mut O) -> SimResult<u64>
    where
        I: IntoIterator<Item = Result<TraceRecord, TraceError>>,
        O: AccessObserver + ?Sized,
    {
        let start = self.accesses();
        for record in records {
            self.step_observed(record?.address, observer)?;
        }
        let replayed = self.accesses() - start;
        tracing::debug!(replayed, "trace replayed");
        Ok(replayed)
    }

    /// Snapshot of the counters as a report.
    pub fn report(&self, trace: &str, elapsed: Duration) -> RunReport {
        RunReport {
            trace: trace.to_string(),
            addresses: self.accesses(),
            host_seconds: elapsed.as_secs_f64(),
            modes: self
                .lanes
                .iter()
                .map(|lane| ModeReport::new(lane.mode, &lane.stats))
                .collect(),
        }
    }
}
