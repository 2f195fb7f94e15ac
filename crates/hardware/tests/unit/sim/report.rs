//! Verbose Report Tests.
//!
//! Pins the exact text of the run preamble, the per-mode header, and each kind
//! of verbose trace record.

use std::io::{self, Write};

use cachesim_core::common::Addr;
use cachesim_core::config::CacheMode;
use cachesim_core::core::cache::observer::AccessObserver;
use cachesim_core::sim::report::{self, VerboseTrace};
use cachesim_core::stats::SEPARATOR;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{TestContext, addr_for};

fn rendered<F>(write: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
{
    let mut buf = Vec::new();
    write(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

/// Writer that fails every call.
#[derive(Debug)]
struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ──────────────────────────────────────────────────────────
// Headers
// ──────────────────────────────────────────────────────────

#[rstest]
#[case("gcc.trace", false, "gcc.trace\nverbosity 0\n")]
#[case("-", true, "-\nverbosity 1\n")]
fn preamble(#[case] trace: &str, #[case] verbose: bool, #[case] expected: &str) {
    assert_eq!(rendered(|out| report::write_preamble(out, trace, verbose)), expected);
}

#[rstest]
#[case(
    CacheMode::DirectMapped,
    "tagmask 0xfffffc00\nsetmask 0x3f0\nmode = direct mapped\n\
     64 blocks, 16 bytes in block; 64 sets, 1 line per set\n"
)]
#[case(
    CacheMode::TwoWay,
    "tagmask 0xfffffe00\nsetmask 0x1f0\nmode = 2-way set associative\n\
     64 blocks, 16 bytes in block; 32 sets, 2 line per set\n"
)]
#[case(
    CacheMode::FourWay,
    "tagmask 0xffffff00\nsetmask 0xf0\nmode = 4-way set associative\n\
     64 blocks, 16 bytes in block; 16 sets, 4 line per set\n"
)]
#[case(
    CacheMode::FullyAssociative,
    "tagmask 0xfffffff0\nsetmask 0x0\nmode = fully associative\n\
     64 blocks, 16 bytes in block; 1 set, 64 line per set\n"
)]
fn mode_header(#[case] mode: CacheMode, #[case] expected: &str) {
    assert_eq!(rendered(|out| report::write_mode_header(out, mode)), expected);
}

// ──────────────────────────────────────────────────────────
// Trace records
// ──────────────────────────────────────────────────────────

#[test]
fn empty_line_miss_record() {
    let mut ctx = TestContext::new(CacheMode::DirectMapped);
    let _ = ctx.access_observed(Addr::new(0x0000_0410));

    let expected = format!(
        "D00000001: addr 0x00000410 looking for tag 0x000001 in set 0x01\n\
         \n\
         State of Set 0x01:\n\
         line 0x00 V=0 tag 0x0000000 last_touch=0000000\n\
         \n\
         Miss! Found empty line 0x0; adding block there; setting last_touch to 1\n\
         {SEPARATOR}\n"
    );
    assert_eq!(rendered(|out| report::write_event(out, &ctx.events[0])), expected);
}

#[test]
fn hit_record_lists_lines_up_to_hit() {
    let mut ctx = TestContext::new(CacheMode::TwoWay);
    let a = addr_for(CacheMode::TwoWay, 0xa, 3);
    let b = addr_for(CacheMode::TwoWay, 0xb, 3);
    let _ = ctx.access(a);
    let _ = ctx.access(b);
    let _ = ctx.access_observed(b);

    let expected = format!(
        "D00000003: addr 0x00001630 looking for tag 0x00000b in set 0x03\n\
         \n\
         State of Set 0x03:\n\
         line 0x00 V=1 tag 0x000000a last_touch=0000001\n\
         line 0x01 V=1 tag 0x000000b last_touch=0000002\n\
         \n\
         Found it in line 0x1.  Hit! Updating last_touch to 3\n\
         {SEPARATOR}\n"
    );
    assert_eq!(rendered(|out| report::write_event(out, &ctx.events[0])), expected);
}

#[test]
fn eviction_record() {
    let mut ctx = TestContext::new(CacheMode::DirectMapped);
    let _ = ctx.access(Addr::new(0x0000_0000));
    let _ = ctx.access_observed(Addr::new(0x0000_0400));

    let expected = format!(
        "D00000002: addr 0x00000400 looking for tag 0x000001 in set 0x00\n\
         \n\
         State of Set 0x00:\n\
         line 0x00 V=1 tag 0x0000000 last_touch=0000001\n\
         \n\
         Miss! Evicting line 0x0; adding block there; setting last_touch to 2\n\
         {SEPARATOR}\n"
    );
    assert_eq!(rendered(|out| report::write_event(out, &ctx.events[0])), expected);
}

// ──────────────────────────────────────────────────────────
// Observer
// ──────────────────────────────────────────────────────────

#[test]
fn verbose_trace_renders_each_event() {
    let mut ctx = TestContext::new(CacheMode::FourWay);
    let _ = ctx.access_observed(Addr::new(0x100));
    let _ = ctx.access_observed(Addr::new(0x100));

    let mut verbose = VerboseTrace::new(Vec::new());
    assert!(verbose.enabled());
    for event in &ctx.events {
        verbose.on_access(event);
    }
    let text = String::from_utf8(verbose.finish().unwrap()).unwrap();
    assert_eq!(text.matches(SEPARATOR).count(), 2);
    assert!(text.contains("Miss! Found empty line 0x0"));
    assert!(text.contains("Found it in line 0x0.  Hit! Updating last_touch to 2"));
}

#[test]
fn verbose_trace_keeps_first_write_error() {
    let mut ctx = TestContext::new(CacheMode::DirectMapped);
    let _ = ctx.access_observed(Addr::new(0x10));

    let mut verbose = VerboseTrace::new(BrokenPipe);
    verbose.on_access(&ctx.events[0]);
    assert!(!verbose.enabled());
    let err = verbose.finish().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}
