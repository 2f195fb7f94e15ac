//! Trace address type.
//!
//! Wraps the raw 32-bit byte address carried by a trace record. Every value is a
//! valid address; the simulator never range-checks it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::BLOCK_OFFSET_MASK;

/// A 32-bit byte address replayed against the cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Addr(pub u32);

impl Addr {
    /// Creates a new address from a raw 32-bit value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Byte offset within the 16-byte block. Ignored by the cache model.
    pub const fn block_offset(self) -> u32 {
        self.0 & BLOCK_OFFSET_MASK
    }
}

impl From<u32> for Addr {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}
