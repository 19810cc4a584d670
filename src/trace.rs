//! The trace collector: deterministic traversal of wrapped/joined error trees.

use std::error::Error;
use std::fmt;
use std::ops::Deref;

use crate::BoxError;
use crate::compose::Joined;
use crate::stamped::Stamped;

// ============================================================================
// Shape - closed dispatch between the two error shapes
// ============================================================================

/// The two shapes traversal distinguishes: a composite with an ordered child
/// list, or everything else (walked as a single-cause chain).
///
/// A composite is never treated as a leaf, even though `Joined` also
/// implements `Error`.
enum Shape<'a> {
    Multi(&'a [BoxError]),
    Single(&'a (dyn Error + 'static)),
}

impl<'a> Shape<'a> {
    fn of(err: &'a (dyn Error + 'static)) -> Self {
        match err.downcast_ref::<Joined>() {
            Some(joined) => Shape::Multi(joined.causes()),
            None => Shape::Single(err),
        }
    }
}

// ============================================================================
// Traversal
// ============================================================================

/// Collect every stamped leaf reachable from `err`, in deterministic order.
///
/// Joined children are visited left to right, depth-first, so a
/// composite-of-composites yields one flat list ordered by join argument
/// order. A non-composite contributes at most one entry: the nearest
/// [`Stamped`] found by the same depth-first search the stamping operation
/// uses (with frames materialized), or nothing if it was never stamped.
///
/// Two calls on the same error value always return the same traces in the
/// same order.
///
/// ## Example
///
/// ```rust
/// use stackstamp::{join, stamp, stack_traces, wrap};
///
/// let x = stamp("error x");
/// let y = wrap("context", stamp("error y")); // wrapping is transparent
/// let err = join([x, y]).unwrap();
///
/// let traces = stack_traces(err.as_ref());
/// assert_eq!(traces.len(), 2);
/// assert_eq!(traces[0].to_string(), "error x");
/// assert_eq!(traces[1].to_string(), "error y"); // cause message, unprefixed
/// ```
pub fn stack_traces<'a>(err: &'a (dyn Error + 'static)) -> StackTraces<'a> {
    let mut traces = Vec::new();
    collect(err, &mut traces);
    StackTraces { traces }
}

fn collect<'a>(err: &'a (dyn Error + 'static), out: &mut Vec<&'a Stamped>) {
    match Shape::of(err) {
        Shape::Multi(causes) => {
            for cause in causes {
                collect(cause.as_ref(), out);
            }
        }
        // A non-composite yields at most one trace, resolved by the same
        // search stamping uses. A wrapper whose cause is a composite is a
        // single node here, not a fan-out: the search stops at the first
        // stamped leaf it reaches.
        Shape::Single(current) => {
            if let Some(stamped) = find_stamped(current) {
                stamped.frames();
                out.push(stamped);
            }
        }
    }
}

/// Find the nearest [`Stamped`] anywhere in `err`'s tree, searching
/// depth-first with joined children left to right. This is the search the
/// stamping operation uses to enforce first-capture-wins, and the one that
/// resolves a non-composite node during collection.
pub(crate) fn find_stamped<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a Stamped> {
    match Shape::of(err) {
        Shape::Multi(causes) => causes.iter().find_map(|cause| find_stamped(cause.as_ref())),
        Shape::Single(mut current) => loop {
            if let Some(stamped) = current.downcast_ref::<Stamped>() {
                return Some(stamped);
            }
            match current.source() {
                Some(next) if next.is::<Joined>() => return find_stamped(next),
                Some(next) => current = next,
                None => return None,
            }
        },
    }
}

/// Flatten a joined error tree into its leaf errors, in join order.
///
/// A non-composite input yields itself as the single leaf. Unlike
/// [`stack_traces`], this does not look inside single-cause chains — a
/// wrapped error is a leaf.
pub fn leaves<'a>(err: &'a (dyn Error + 'static)) -> Vec<&'a (dyn Error + 'static)> {
    match Shape::of(err) {
        Shape::Multi(causes) => causes
            .iter()
            .flat_map(|cause| leaves(cause.as_ref()))
            .collect(),
        Shape::Single(err) => vec![err],
    }
}

// ============================================================================
// StackTraces - the ordered result list
// ============================================================================

/// Ordered list of stamped leaves produced by one [`stack_traces`] call.
///
/// Derefs to `[&Stamped]` for indexing and iteration. `Display` renders the
/// human-readable form; with the `serde` feature the list serializes as an
/// array of `{ "error", "frames" }` records (empty list is `[]`, never null).
pub struct StackTraces<'a> {
    traces: Vec<&'a Stamped>,
}

impl<'a> StackTraces<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, &'a Stamped> {
        self.traces.iter()
    }
}

impl<'a> Deref for StackTraces<'a> {
    type Target = [&'a Stamped];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.traces
    }
}

impl<'a> IntoIterator for &'a StackTraces<'a> {
    type Item = &'a &'a Stamped;
    type IntoIter = std::slice::Iter<'a, &'a Stamped>;

    fn into_iter(self) -> Self::IntoIter {
        self.traces.iter()
    }
}

impl fmt::Display for StackTraces<'_> {
    /// Per trace: the message line, then `name` and `\t file:line` on the two
    /// following lines for each frame. Traces are separated by a single
    /// newline, with no trailing separator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stamped) in self.traces.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            fmt::Display::fmt(stamped, f)?;
            for frame in stamped.frames() {
                write!(f, "\n{}\n\t{}:{}", frame.name, frame.file, frame.line)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for StackTraces<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.traces.iter()).finish()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for StackTraces<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.traces.iter())
    }
}
