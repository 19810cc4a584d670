//! # stackstamp - stack traces for wrapped and joined errors
//!
//! Stamp an error with the current call stack **once**, at the point it first
//! becomes interesting, then recover the capture path for every stamped leaf
//! in an arbitrarily nested tree of wrapped and joined errors:
//!
//! ```text
//! error a
//! myapp::db::load_user
//!         src/db.rs:142
//! myapp::api::handle_request
//!         src/api.rs:89
//! ```
//!
//! ## Try It Now
//!
//! Wrap errors with [`stamp()`] at their origin and read them back with
//! [`stack_traces()`] at the top of your program:
//!
//! ```rust
//! use stackstamp::{stamp, stack_traces, BoxError};
//!
//! fn load_config() -> Result<(), BoxError> {
//!     Err(stamp("config file missing"))
//! }
//!
//! let err = load_config().unwrap_err();
//! let traces = stack_traces(err.as_ref());
//! assert_eq!(traces.len(), 1);
//! println!("{traces}"); // message + one "name\n\tfile:line" pair per frame
//! ```
//!
//! ## First Capture Wins
//!
//! Re-stamping an error that already carries a stack anywhere in its chain is
//! a no-op — the input is returned unchanged. The stack you get back is always
//! the one captured nearest to the error's true origin:
//!
//! ```rust
//! use stackstamp::{stamp, stack_traces};
//!
//! fn origin() -> stackstamp::BoxError {
//!     stamp("boom") // stack captured here
//! }
//!
//! fn caller() -> stackstamp::BoxError {
//!     stamp(origin()) // no-op: already stamped
//! }
//!
//! let err = caller();
//! assert_eq!(stack_traces(err.as_ref()).len(), 1);
//! ```
//!
//! ## Wrapping and Joining
//!
//! Stamping is invisible in textual form and transparent to chain walking, so
//! it composes with any wrapping mechanism. This crate ships the two
//! composition primitives its traversal understands:
//!
//! | Function | Effect |
//! |----------|--------|
//! | [`wrap("ctx", err)`](wrap) | Single-cause wrapper, displays as `ctx: err` |
//! | [`join([x, y])`](join) | Composite holding an ordered list of causes |
//!
//! [`stack_traces()`] walks the whole tree depth-first: joined children are
//! visited left to right and nested composites flatten into one ordered list.
//! Errors that were never stamped contribute nothing.
//!
//! ```rust
//! use stackstamp::{join, stamp, stack_traces};
//!
//! let x = stamp("error x");
//! let y = stamp("error y");
//! let joined = join([x, y]).unwrap();
//!
//! let traces = stack_traces(joined.as_ref());
//! assert_eq!(traces.len(), 2);
//! assert_eq!(traces[0].to_string(), "error x");
//! assert_eq!(traces[1].to_string(), "error y");
//! ```
//!
//! ## Results
//!
//! Propagating through `Result` chains reads best with the extension trait —
//! `Ok` values pass through untouched:
//!
//! ```rust
//! use stackstamp::{BoxError, ResultStampExt};
//!
//! fn read(path: &str) -> Result<String, BoxError> {
//!     std::fs::read_to_string(path)
//!         .stamp()
//!         .wrap_err("reading config")
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Capture is cheap, resolution is lazy**: [`stamp()`] records raw
//!   instruction addresses and nothing else, reporting at most
//!   [`DEFAULT_MAX_FRAMES`] resolved frames.
//!   Symbol resolution to `(name, file, line)` happens on first access to
//!   [`Stamped::frames()`], at most once per error (thread-safe write-once
//!   cache), so stacks that are captured but never inspected cost almost
//!   nothing.
//! - **Depth is explicit**: [`stamp_with()`] takes a [`StampConfig`] instead
//!   of consulting ambient global state.
//! - **Never fails**: stamping coerces anything `Into<BoxError>` (including
//!   `&str`/`String`), traversal of an unstamped error yields an empty list,
//!   and an unresolvable frame becomes an empty-field entry rather than an
//!   error.
//! - **Serialization** (`serde` feature, on by default): a stamped error
//!   serializes as `{ "error": <message>, "frames": [{name, file, line}, ..] }`
//!   and a trace list as an array — empty list is `[]`, never null.

mod capture;
mod chain;
mod compose;
mod ext;
pub mod prelude;
mod stamped;
mod trace;

pub use capture::{DEFAULT_MAX_FRAMES, Frame, StampConfig};
pub use chain::{Chain, chain};
pub use compose::{Joined, Wrapped, join, wrap};
pub use ext::ResultStampExt;
pub use stamped::Stamped;
pub use trace::{StackTraces, leaves, stack_traces};

use std::error::Error;

/// The conventional boxed error this crate composes with.
///
/// `Into<BoxError>` is implemented for `&str`, `String`, and every
/// `Error + Send + Sync` type via std blanket impls, which is what lets
/// [`stamp()`] accept raw values where an error was expected.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Stamp an error with the current call stack, using the default
/// [`StampConfig`] (at most [`DEFAULT_MAX_FRAMES`] frames).
///
/// If the input already carries a [`Stamped`] anywhere in its error tree
/// (single-cause chain or joined branches), the input is returned unchanged —
/// the first capture wins. Stamping never fails: anything convertible to
/// [`BoxError`] is accepted, including plain strings.
///
/// ## Example
///
/// ```rust
/// use stackstamp::{stamp, stack_traces};
///
/// let err = stamp(std::io::Error::other("disk on fire"));
/// assert_eq!(err.to_string(), "disk on fire"); // message is untouched
/// assert_eq!(stack_traces(err.as_ref()).len(), 1);
/// ```
#[inline]
pub fn stamp<E>(err: E) -> BoxError
where
    E: Into<BoxError>,
{
    stamp_with(err, &StampConfig::default())
}

/// Stamp an error with the current call stack, bounded by an explicit
/// [`StampConfig`].
///
/// Same idempotence contract as [`stamp()`]. A `max_frames` of zero captures
/// nothing but still marks the error as stamped.
pub fn stamp_with<E>(err: E, config: &StampConfig) -> BoxError
where
    E: Into<BoxError>,
{
    let err = err.into();
    if trace::find_stamped(err.as_ref()).is_some() {
        return err;
    }
    Box::new(Stamped::capture(err, config))
}

#[cfg(test)]
mod tests;
