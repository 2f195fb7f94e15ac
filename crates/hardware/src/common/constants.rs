//! Global Cache Constants.
//!
//! Fixed parameters shared by every cache configuration:
//! 1. **Block Constants:** Block size and the offset bits it implies.
//! 2. **Capacity Constants:** Total line count, constant across modes.
//! 3. **Simulation Constants:** The first value of the LRU access clock.

/// Block size in bytes.
pub const BLOCK_BYTES: u32 = 16;

/// Number of low address bits selecting a byte within a block.
pub const BLOCK_OFFSET_BITS: u32 = 4;

/// Mask for extracting the block offset from an address.
pub const BLOCK_OFFSET_MASK: u32 = BLOCK_BYTES - 1;

/// Total number of lines in every cache configuration.
///
/// Modes differ only in how these lines are partitioned into sets.
pub const TOTAL_LINES: usize = 64;

/// Access counter value assigned to the first record of a trace.
pub const FIRST_ACCESS: u64 = 1;
