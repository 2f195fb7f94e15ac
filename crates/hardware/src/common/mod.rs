//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by the cache, the trace
//! reader, and the driver. It includes:
//! 1. **Address Type:** A strong type for 32-bit trace addresses.
//! 2. **Constants:** Block size and total line capacity.
//! 3. **Error Handling:** Configuration, resource, and trace errors.

/// Address type definition.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types.
pub mod error;

pub use addr::Addr;
pub use constants::{BLOCK_OFFSET_BITS, FIRST_ACCESS, TOTAL_LINES};
pub use error::{SimError, SimResult, TraceError};
