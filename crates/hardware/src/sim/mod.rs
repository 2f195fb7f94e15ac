//! Trace replay.
//!
//! Reads address traces, drives the active caches over them, and renders the
//! verbose per-access output.

/// Header and verbose trace rendering.
pub mod report;
/// Multi-mode trace driver.
pub mod simulator;
/// Trace file parsing.
pub mod trace;

pub use simulator::Simulator;
