//! Unit tests for stackstamp.
//!
//! These tests live in `src/` to retain access to `pub(crate)` items like
//! `capture::capture` and `trace::find_stamped`. Frame *content* assertions
//! (function names, files, lines) live in the integration tests instead,
//! where the capturing functions compile into a distinct crate and are not
//! trimmed as capture machinery.

use crate::capture::{self, MACHINERY_ALLOWANCE, StampConfig};
use crate::trace::find_stamped;
use crate::{
    BoxError, Frame, Joined, ResultStampExt, Stamped, chain, join, leaves, stack_traces, stamp,
    stamp_with, wrap,
};

#[test]
fn default_config_captures_fifty_frames() {
    assert_eq!(StampConfig::default().max_frames, 50);
}

#[test]
fn capture_respects_max_frames_plus_allowance() {
    let raw = capture::capture(&StampConfig { max_frames: 5 });
    assert!(!raw.is_empty());
    assert!(
        raw.len() <= 5 + MACHINERY_ALLOWANCE,
        "got {} raw frames",
        raw.len()
    );
}

#[test]
fn capture_with_zero_depth_is_empty() {
    assert!(capture::capture(&StampConfig { max_frames: 0 }).is_empty());
    assert!(capture::resolve(&[], 0).is_empty());
}

#[test]
fn stamp_coerces_plain_strings() {
    let err = stamp("raw failure");
    let stamped = err.downcast_ref::<Stamped>().expect("should be stamped");
    assert_eq!(stamped.cause().to_string(), "raw failure");
    assert_eq!(err.to_string(), "raw failure");
}

#[test]
fn display_is_transparent() {
    let err = stamp(std::io::Error::other("disk on fire"));
    assert_eq!(err.to_string(), "disk on fire");
}

#[test]
fn restamping_returns_the_same_instance() {
    let first = stamp("boom");
    let original: *const Stamped = first.downcast_ref::<Stamped>().unwrap();

    let second = stamp(first);
    let surviving: *const Stamped = second.downcast_ref::<Stamped>().unwrap();
    assert!(
        std::ptr::eq(original, surviving),
        "re-stamping must return the existing Stamped, not a new wrapper"
    );
}

#[test]
fn restamping_through_a_wrapper_is_a_noop() {
    let wrapped = wrap("context", stamp("boom"));
    let restamped = stamp(wrapped);
    // The wrapper survives: stamp found the stamp below it and backed off.
    assert!(restamped.downcast_ref::<crate::Wrapped>().is_some());
    assert_eq!(stack_traces(restamped.as_ref()).len(), 1);
}

#[test]
fn stamping_a_composite_with_a_stamped_leaf_is_a_noop() {
    let joined = join([stamp("x"), BoxError::from("y")]).unwrap();
    let restamped = stamp(joined);
    assert!(
        restamped.downcast_ref::<Joined>().is_some(),
        "composite must come back unchanged, not wrapped in a new Stamped"
    );
}

#[test]
fn find_stamped_walks_chains_and_branches() {
    let plain: BoxError = "plain".into();
    assert!(find_stamped(plain.as_ref()).is_none());

    let chained = wrap("outer", wrap("inner", stamp("leaf")));
    assert!(find_stamped(chained.as_ref()).is_some());

    let branched = join([BoxError::from("plain"), stamp("stamped")]).unwrap();
    assert!(find_stamped(branched.as_ref()).is_some());
}

#[test]
fn zero_depth_stamp_still_marks_the_error() {
    let err = stamp_with("boom", &StampConfig { max_frames: 0 });
    let traces = stack_traces(err.as_ref());
    assert_eq!(traces.len(), 1);
    assert!(traces[0].frames().is_empty());
    assert_eq!(traces[0].captured_len(), 0);
}

#[test]
fn frames_are_bounded_by_config() {
    let err = stamp_with("boom", &StampConfig { max_frames: 3 });
    let stamped = err.downcast_ref::<Stamped>().unwrap();
    assert!(stamped.captured_len() <= 3 + MACHINERY_ALLOWANCE);
    assert!(stamped.frames().len() <= 3);
}

#[test]
fn trimming_skips_unresolved_frames_inside_the_machinery_prefix() {
    fn named(name: &str) -> Frame {
        Frame {
            name: name.into(),
            file: String::new(),
            line: 0,
        }
    }

    let frames = vec![
        named("backtrace::backtrace::trace"),
        named(""), // machinery frame that failed to symbolicate
        named(concat!(env!("CARGO_CRATE_NAME"), "::capture::capture")),
        named("myapp::run"),
        named(""), // unresolvable caller frame, must survive
    ];
    let trimmed = capture::trim_machinery(frames);
    assert_eq!(trimmed.len(), 2);
    assert_eq!(trimmed[0].name, "myapp::run");
    assert_eq!(trimmed[1].name, "");
}

#[test]
fn fully_stripped_stacks_are_not_trimmed_away() {
    let frames = vec![
        Frame {
            name: String::new(),
            file: String::new(),
            line: 0,
        };
        3
    ];
    assert_eq!(capture::trim_machinery(frames).len(), 3);
}

#[test]
fn frame_cache_is_write_once() {
    let err = stamp("boom");
    let stamped = err.downcast_ref::<Stamped>().unwrap();
    let first = stamped.frames().as_ptr();
    let second = stamped.frames().as_ptr();
    assert_eq!(first, second);
}

#[test]
fn chain_walks_every_source_link() {
    let err = wrap("outer", wrap("inner", BoxError::from("leaf")));
    assert_eq!(chain(err.as_ref()).count(), 3);
    assert!(chain(err.as_ref()).any(|e| e.is::<crate::Wrapped>()));
}

#[test]
fn join_of_nothing_is_none() {
    assert!(join(Vec::<BoxError>::new()).is_none());
}

#[test]
fn join_of_one_still_wraps() {
    let err = join([BoxError::from("only")]).unwrap();
    let joined = err.downcast_ref::<Joined>().unwrap();
    assert_eq!(joined.causes().len(), 1);
    assert_eq!(err.to_string(), "only");
}

#[test]
fn joined_display_separates_messages_with_newlines() {
    let err = join([BoxError::from("first"), BoxError::from("second")]).unwrap();
    assert_eq!(err.to_string(), "first\nsecond");
}

#[test]
fn leaves_flatten_nested_composites() {
    let inner = join([BoxError::from("x"), BoxError::from("y")]).unwrap();
    let outer = join([inner, BoxError::from("z")]).unwrap();
    let leaves = leaves(outer.as_ref());
    let messages: Vec<String> = leaves.iter().map(|e| e.to_string()).collect();
    assert_eq!(messages, ["x", "y", "z"]);
}

#[test]
fn leaves_of_a_plain_error_is_itself() {
    let err: BoxError = "alone".into();
    let leaves = leaves(err.as_ref());
    assert_eq!(leaves.len(), 1);
    assert_eq!(leaves[0].to_string(), "alone");
}

#[test]
fn unstamped_error_yields_no_traces() {
    let err: BoxError = "never stamped".into();
    let traces = stack_traces(err.as_ref());
    assert!(traces.is_empty());
    assert_eq!(traces.len(), 0);
}

#[test]
fn result_ext_passes_ok_through() {
    let ok: Result<u32, std::io::Error> = Ok(7);
    assert_eq!(ok.stamp().unwrap(), 7);
}

#[test]
fn result_ext_stamps_and_wraps() {
    let err: Result<(), std::io::Error> = Err(std::io::Error::other("io down"));
    let err = err.stamp().wrap_err("syncing state").unwrap_err();
    assert_eq!(err.to_string(), "syncing state: io down");

    let traces = stack_traces(err.as_ref());
    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].to_string(), "io down");
}

#[test]
fn wrapped_exposes_its_message() {
    let err = wrap("context", BoxError::from("leaf"));
    let wrapped = err.downcast_ref::<crate::Wrapped>().unwrap();
    assert_eq!(wrapped.message(), "context");
}
