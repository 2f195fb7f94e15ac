//! Configuration system for the cache simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! a run. It provides:
//! 1. **Defaults:** Baseline selector and verbosity.
//! 2. **Geometry:** The per-mode lookup table of set count, degree, and bit fields.
//! 3. **Enums:** Associativity modes and the cache-type selector.
//! 4. **Structures:** The root `Config`, deserializable from JSON.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built from CLI flags
//! starting from `Config::default()`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::constants::BLOCK_OFFSET_BITS;
use crate::common::error::{SimError, SimResult};

/// Default configuration constants for the simulator.
mod defaults {
    /// Per-access trace output is off unless requested.
    pub const VERBOSE: bool = false;

    /// Raw selector of the default cache type (direct mapped).
    pub const SELECTOR: u8 = 0;
}

/// Address bit partitioning and storage shape for one associativity mode.
///
/// `sets * degree` is the same for every mode; only the partitioning varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    /// Number of sets in the cache.
    pub sets: usize,
    /// Lines per set (associativity degree).
    pub degree: usize,
    /// Right shift applied after masking to obtain the set index.
    pub set_shift: u32,
    /// Mask selecting the set-index bits of an address.
    pub set_mask: u32,
    /// First address bit belonging to the tag.
    pub tag_shift: u32,
}

impl Geometry {
    /// Mask selecting the tag bits of an address.
    pub const fn tag_mask(&self) -> u32 {
        u32::MAX << self.tag_shift
    }

    /// Total number of lines (`sets * degree`).
    pub const fn capacity(&self) -> usize {
        self.sets * self.degree
    }
}

const DIRECT_MAPPED: Geometry = Geometry {
    sets: 64,
    degree: 1,
    set_shift: BLOCK_OFFSET_BITS,
    set_mask: 0x0000_03f0,
    tag_shift: 10,
};

const TWO_WAY: Geometry = Geometry {
    sets: 32,
    degree: 2,
    set_shift: BLOCK_OFFSET_BITS,
    set_mask: 0x0000_01f0,
    tag_shift: 9,
};

const FOUR_WAY: Geometry = Geometry {
    sets: 16,
    degree: 4,
    set_shift: BLOCK_OFFSET_BITS,
    set_mask: 0x0000_00f0,
    tag_shift: 8,
};

const FULLY_ASSOCIATIVE: Geometry = Geometry {
    sets: 1,
    degree: 64,
    set_shift: BLOCK_OFFSET_BITS,
    set_mask: 0,
    tag_shift: 4,
};

/// Cache associativity modes.
///
/// All modes hold 64 lines of 16 bytes; they differ in how the lines are grouped
/// into sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CacheMode {
    /// 64 sets of 1 line.
    #[default]
    DirectMapped,
    /// 32 sets of 2 lines.
    TwoWay,
    /// 16 sets of 4 lines.
    FourWay,
    /// 1 set of 64 lines.
    FullyAssociative,
}

impl CacheMode {
    /// Every mode, in selector order.
    pub const ALL: [Self; 4] = [
        Self::DirectMapped,
        Self::TwoWay,
        Self::FourWay,
        Self::FullyAssociative,
    ];

    /// Returns the geometry of this mode.
    pub const fn geometry(self) -> Geometry {
        match self {
            Self::DirectMapped => DIRECT_MAPPED,
            Self::TwoWay => TWO_WAY,
            Self::FourWay => FOUR_WAY,
            Self::FullyAssociative => FULLY_ASSOCIATIVE,
        }
    }

    /// Short description used in the verbose header (`mode = ...`).
    pub const fn description(self) -> &'static str {
        match self {
            Self::DirectMapped => "direct mapped",
            Self::TwoWay => "2-way set associative",
            Self::FourWay => "4-way set associative",
            Self::FullyAssociative => "fully associative",
        }
    }

    /// Block title used when several modes are reported together.
    pub const fn title(self) -> &'static str {
        match self {
            Self::DirectMapped => "Direct Mapped Cache",
            Self::TwoWay => "Two-Way Set Associative",
            Self::FourWay => "Four-Way Set Associative",
            Self::FullyAssociative => "Fully Associative",
        }
    }
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl TryFrom<u8> for CacheMode {
    type Error = SimError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(SimError::InvalidMode(value))
    }
}

/// Which cache configurations a run drives.
///
/// Serialized as the raw CLI selector: `0..=3` pick a single mode, `4` runs all
/// four side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ModeSelector {
    /// Drive a single cache.
    Single(CacheMode),
    /// Fan each access out to one cache per mode.
    All,
}

impl ModeSelector {
    /// Raw selector value of [`ModeSelector::All`].
    pub const ALL_SELECTOR: u8 = 4;

    /// Modes driven by this selector, in report order.
    pub fn modes(self) -> Vec<CacheMode> {
        match self {
            Self::Single(mode) => vec![mode],
            Self::All => CacheMode::ALL.to_vec(),
        }
    }

    /// Returns `true` for [`ModeSelector::All`].
    pub const fn is_all(self) -> bool {
        matches!(self, Self::All)
    }
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self::Single(CacheMode::default())
    }
}

impl TryFrom<u8> for ModeSelector {
    type Error = SimError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value == Self::ALL_SELECTOR {
            return Ok(Self::All);
        }
        CacheMode::try_from(value)
            .map(Self::Single)
            .map_err(|_| SimError::InvalidSelector(i64::from(value)))
    }
}

impl From<ModeSelector> for u8 {
    fn from(selector: ModeSelector) -> Self {
        match selector {
            ModeSelector::Single(mode) => mode as Self,
            ModeSelector::All => ModeSelector::ALL_SELECTOR,
        }
    }
}

/// Root configuration structure containing all run settings.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheMode, Config, ModeSelector};
///
/// let config = Config::from_json(r#"{ "general": { "verbose": true }, "cache": { "selector": 2 } }"#)
///     .unwrap();
/// assert!(config.general.verbose);
/// assert_eq!(config.cache.selector, ModeSelector::Single(CacheMode::FourWay));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General run settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Cache selection.
    #[serde(default)]
    pub cache: CacheSelection,
}

impl Config {
    /// Parses a configuration document. Missing sections take their defaults.
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rejects combinations the reporter cannot render.
    ///
    /// Verbose output interleaves per-access traces, so it is only allowed when a
    /// single mode is driven.
    pub fn validate(&self) -> SimResult<()> {
        if self.general.verbose && self.cache.selector.is_all() {
            return Err(SimError::VerboseWithAll);
        }
        Ok(())
    }
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Emit the per-access trace and the verbose header.
    #[serde(default = "GeneralConfig::default_verbose")]
    pub verbose: bool,
}

impl GeneralConfig {
    const fn default_verbose() -> bool {
        defaults::VERBOSE
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: Self::default_verbose(),
        }
    }
}

/// Cache selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSelection {
    /// Cache type selector (`0..=4`).
    #[serde(default = "CacheSelection::default_selector")]
    pub selector: ModeSelector,
}

impl CacheSelection {
    fn default_selector() -> ModeSelector {
        ModeSelector::try_from(defaults::SELECTOR).unwrap_or_default()
    }
}

impl Default for CacheSelection {
    fn default() -> Self {
        Self {
            selector: Self::default_selector(),
        }
    }
}
