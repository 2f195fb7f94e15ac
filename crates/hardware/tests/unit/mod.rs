//! # Unit Components
//!
//! This module organizes the unit tests by crate module: configuration, the cache
//! core, trace replay, and statistics.

/// Unit tests for configuration, mode geometry, and selector conversion.
pub mod config;
