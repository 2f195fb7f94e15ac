//! Address Decoder.
//!
//! Splits a 32-bit address into the fields a cache lookup needs:
//! 1. **Block Offset:** The low 4 bits, discarded.
//! 2. **Set Index:** The bits above the offset that select a set (none when fully
//!    associative).
//! 3. **Tag:** The remaining high bits, shifted down to bit 0.
//!
//! Decoding is a pure function of the mode's [`Geometry`]; it has no state and
//! cannot fail for a valid [`CacheMode`].

use serde::Serialize;

use crate::common::Addr;
use crate::config::{CacheMode, Geometry};

/// Fields extracted from an address for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decoded {
    /// Tag bits, right-aligned.
    pub tag: u32,
    /// Index of the set to probe.
    pub set_index: usize,
    /// Lines per set for the mode.
    pub degree: usize,
}

/// Decodes `addr` for the given mode.
///
/// # Examples
///
/// ```
/// use cachesim_core::common::Addr;
/// use cachesim_core::config::CacheMode;
/// use cachesim_core::core::cache::decoder::decode;
///
/// let d = decode(CacheMode::DirectMapped, Addr::new(0x0000_0410));
/// assert_eq!((d.tag, d.set_index, d.degree), (1, 1, 1));
/// ```
#[inline]
pub const fn decode(mode: CacheMode, addr: Addr) -> Decoded {
    decode_with(&mode.geometry(), addr)
}

/// Decodes `addr` against an explicit geometry.
#[inline]
pub const fn decode_with(geometry: &Geometry, addr: Addr) -> Decoded {
    let raw = addr.val();
    Decoded {
        tag: (raw & geometry.tag_mask()) >> geometry.tag_shift,
        set_index: ((raw & geometry.set_mask) >> geometry.set_shift) as usize,
        degree: geometry.degree,
    }
}
