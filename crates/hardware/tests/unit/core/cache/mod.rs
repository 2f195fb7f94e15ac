//! # Cache Tests
//!
//! Organized by concern: field extraction, access classification, replacement
//! order, and randomized invariants.
