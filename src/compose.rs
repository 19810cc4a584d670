//! Composition primitives: message wrapping and error joining.
//!
//! The trace collector only ever *consumes* these — it recognizes [`Joined`]
//! as the multi-cause shape and sees through [`Wrapped`] (and any other
//! single-cause wrapper) via `source()`.

use std::error::Error;
use std::fmt;

use crate::BoxError;

// ============================================================================
// Joined - the multi-cause composite
// ============================================================================

/// A composite error combining an ordered list of causes.
///
/// Built by [`join()`]. Child order is the join argument order and is
/// preserved by traversal. `Display` is the child messages separated by
/// newlines; there is no single-cause `source()` — the children are reached
/// through [`causes()`](Self::causes) instead.
///
/// ## Example
///
/// ```rust
/// use stackstamp::join;
///
/// let err = join(["first".into(), "second".into()]).unwrap();
/// assert_eq!(err.to_string(), "first\nsecond");
/// ```
#[derive(Debug)]
pub struct Joined {
    causes: Vec<BoxError>,
}

impl Joined {
    /// The combined errors, in join order. Never empty.
    #[inline]
    pub fn causes(&self) -> &[BoxError] {
        &self.causes
    }
}

impl fmt::Display for Joined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cause) in self.causes.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            fmt::Display::fmt(cause, f)?;
        }
        Ok(())
    }
}

impl Error for Joined {}

/// Combine errors into one composite, preserving order.
///
/// Returns `None` when the input is empty. A single error is still wrapped,
/// so callers can rely on the result downcasting to [`Joined`]. Nesting is
/// fine: joining an existing composite with further errors produces a
/// composite-of-composites that [`stack_traces`] flattens depth-first.
///
/// ## Accumulating across steps
///
/// ```rust
/// use stackstamp::{BoxError, join};
///
/// let mut combined: Option<BoxError> = None;
/// for step in ["step 1 failed", "step 2 failed"] {
///     let err: BoxError = step.into();
///     combined = join(combined.into_iter().chain([err]));
/// }
/// assert_eq!(combined.unwrap().to_string(), "step 1 failed\nstep 2 failed");
/// ```
///
/// [`stack_traces`]: crate::stack_traces
pub fn join<I>(errs: I) -> Option<BoxError>
where
    I: IntoIterator<Item = BoxError>,
{
    let causes: Vec<BoxError> = errs.into_iter().collect();
    if causes.is_empty() {
        return None;
    }
    Some(Box::new(Joined { causes }))
}

// ============================================================================
// Wrapped - the single-cause message wrapper
// ============================================================================

/// A single-cause wrapper adding a context message.
///
/// Built by [`wrap()`]. Displays as `"{msg}: {cause}"` and unwraps to the
/// cause, so stamping below it stays reachable and identity checks against
/// the original error keep working.
#[derive(Debug)]
pub struct Wrapped {
    msg: String,
    cause: BoxError,
}

impl Wrapped {
    /// The context message, without the cause.
    #[inline]
    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.msg, self.cause)
    }
}

impl Error for Wrapped {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

/// Wrap an error with a context message.
///
/// ```rust
/// use stackstamp::wrap;
///
/// let err = wrap("reading config", std::io::Error::other("permission denied"));
/// assert_eq!(err.to_string(), "reading config: permission denied");
/// ```
pub fn wrap<E>(msg: impl Into<String>, err: E) -> BoxError
where
    E: Into<BoxError>,
{
    Box::new(Wrapped {
        msg: msg.into(),
        cause: err.into(),
    })
}
