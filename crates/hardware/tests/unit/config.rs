//! Configuration Unit Tests.
//!
//! Verifies defaults, JSON loading, the selector and mode conversions, and the
//! per-mode geometry table.

use cachesim_core::common::{SimError, TOTAL_LINES};
use cachesim_core::config::{CacheMode, Config, ModeSelector};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ──────────────────────────────────────────────────────────
// Defaults and JSON
// ──────────────────────────────────────────────────────────

#[test]
fn default_is_quiet_direct_mapped() {
    let config = Config::default();
    assert!(!config.general.verbose);
    assert_eq!(config.cache.selector, ModeSelector::Single(CacheMode::DirectMapped));
    assert!(config.validate().is_ok());
}

#[test]
fn empty_document_takes_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert!(!config.general.verbose);
    assert_eq!(config.cache.selector, ModeSelector::default());
}

#[test]
fn partial_document_keeps_other_defaults() {
    let config = Config::from_json(r#"{ "cache": { "selector": 4 } }"#).unwrap();
    assert!(!config.general.verbose);
    assert_eq!(config.cache.selector, ModeSelector::All);
}

#[test]
fn out_of_range_selector_in_json_is_rejected() {
    let err = Config::from_json(r#"{ "cache": { "selector": 5 } }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(_)), "got {err:?}");
}

#[test]
fn malformed_json_is_rejected() {
    let err = Config::from_json("{ general: ").unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
}

#[test]
fn selector_serializes_as_raw_number() {
    let config = Config::from_json(r#"{ "cache": { "selector": 3 } }"#).unwrap();
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["cache"]["selector"], 3);
    assert_eq!(json["general"]["verbose"], false);
}

// ──────────────────────────────────────────────────────────
// Validation
// ──────────────────────────────────────────────────────────

#[test]
fn verbose_with_all_is_rejected() {
    let config =
        Config::from_json(r#"{ "general": { "verbose": true }, "cache": { "selector": 4 } }"#)
            .unwrap();
    assert!(matches!(config.validate(), Err(SimError::VerboseWithAll)));
}

#[rstest]
fn verbose_with_single_mode_is_accepted(#[values(0u8, 1, 2, 3)] raw: u8) {
    let mut config = Config::default();
    config.general.verbose = true;
    config.cache.selector = ModeSelector::try_from(raw).unwrap();
    assert!(config.validate().is_ok());
}

// ──────────────────────────────────────────────────────────
// Selector and mode conversions
// ──────────────────────────────────────────────────────────

#[rstest]
#[case(0, ModeSelector::Single(CacheMode::DirectMapped))]
#[case(1, ModeSelector::Single(CacheMode::TwoWay))]
#[case(2, ModeSelector::Single(CacheMode::FourWay))]
#[case(3, ModeSelector::Single(CacheMode::FullyAssociative))]
#[case(4, ModeSelector::All)]
fn selector_from_raw(#[case] raw: u8, #[case] expected: ModeSelector) {
    let selector = ModeSelector::try_from(raw).unwrap();
    assert_eq!(selector, expected);
    assert_eq!(u8::from(selector), raw);
}

#[rstest]
fn invalid_selector_is_rejected(#[values(5u8, 44, 255)] raw: u8) {
    match ModeSelector::try_from(raw) {
        Err(SimError::InvalidSelector(value)) => assert_eq!(value, i64::from(raw)),
        other => panic!("expected InvalidSelector, got {other:?}"),
    }
}

#[test]
fn invalid_selector_message() {
    let err = ModeSelector::try_from(7).unwrap_err();
    assert_eq!(err.to_string(), "invalid cache_type: 7 (must be range 0-4)");
}

#[test]
fn mode_from_raw() {
    for (raw, mode) in CacheMode::ALL.iter().enumerate() {
        assert_eq!(CacheMode::try_from(raw as u8).unwrap(), *mode);
    }
    assert!(matches!(CacheMode::try_from(4), Err(SimError::InvalidMode(4))));
}

#[test]
fn all_selector_lists_modes_in_order() {
    assert_eq!(ModeSelector::All.modes(), CacheMode::ALL.to_vec());
    assert_eq!(
        ModeSelector::Single(CacheMode::FourWay).modes(),
        vec![CacheMode::FourWay]
    );
    assert!(ModeSelector::All.is_all());
    assert!(!ModeSelector::default().is_all());
}

// ──────────────────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────────────────

#[rstest]
#[case(CacheMode::DirectMapped, 64, 1, 0x3f0)]
#[case(CacheMode::TwoWay, 32, 2, 0x1f0)]
#[case(CacheMode::FourWay, 16, 4, 0xf0)]
#[case(CacheMode::FullyAssociative, 1, 64, 0)]
fn geometry_table(
    #[case] mode: CacheMode,
    #[case] sets: usize,
    #[case] degree: usize,
    #[case] set_mask: u32,
) {
    let g = mode.geometry();
    assert_eq!((g.sets, g.degree, g.set_mask, g.set_shift), (sets, degree, set_mask, 4));
    assert_eq!(g.capacity(), TOTAL_LINES);
}

#[test]
fn mode_labels() {
    assert_eq!(CacheMode::DirectMapped.to_string(), "direct mapped");
    assert_eq!(CacheMode::TwoWay.to_string(), "2-way set associative");
    assert_eq!(CacheMode::FourWay.to_string(), "4-way set associative");
    assert_eq!(CacheMode::FullyAssociative.to_string(), "fully associative");
    assert_eq!(CacheMode::DirectMapped.title(), "Direct Mapped Cache");
    assert_eq!(CacheMode::FullyAssociative.title(), "Fully Associative");
}
