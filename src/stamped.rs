//! The [`Stamped`] wrapper type: one cause, one captured stack.

use std::error::Error;
use std::fmt;
use std::sync::OnceLock;

use crate::BoxError;
use crate::capture::{self, Frame, StampConfig};

/// An error carrying the call stack captured when it was first stamped.
///
/// Created by [`stamp`]/[`stamp_with`]; never constructed directly. The
/// wrapper is textually invisible — `Display` delegates to the cause with no
/// prefix or suffix — but structurally discoverable: `source()` returns the
/// cause, so generic chain walkers and downcast-based checks see through it.
///
/// ## Laziness
///
/// Construction records raw instruction addresses only. The resolved
/// [`Frame`] list is materialized on first call to [`frames()`](Self::frames)
/// (or on serialization) and cached write-once behind an [`OnceLock`], so
/// concurrent traversal of one shared instance resolves at most once and
/// never observes a torn cache.
///
/// ## Example
///
/// ```rust
/// use stackstamp::{Stamped, stamp};
///
/// let err = stamp("boom");
/// let stamped = err.downcast_ref::<Stamped>().unwrap();
/// assert_eq!(stamped.to_string(), "boom");
/// assert_eq!(stamped.cause().to_string(), "boom");
/// ```
///
/// [`stamp`]: crate::stamp
/// [`stamp_with`]: crate::stamp_with
pub struct Stamped {
    cause: BoxError,
    raw: Vec<usize>,
    max_frames: usize,
    frames: OnceLock<Vec<Frame>>,
}

impl Stamped {
    /// Capture the current stack and attach it to `cause`.
    ///
    /// Kept out of line so the capture-machinery frames trimmed during
    /// resolution stay recognizable.
    #[inline(never)]
    pub(crate) fn capture(cause: BoxError, config: &StampConfig) -> Self {
        Self {
            cause,
            raw: capture::capture(config),
            max_frames: config.max_frames,
            frames: OnceLock::new(),
        }
    }

    /// The wrapped error.
    #[inline]
    pub fn cause(&self) -> &(dyn Error + 'static) {
        self.cause.as_ref()
    }

    /// The resolved frames of the stack captured at stamp time, innermost
    /// call site first.
    ///
    /// Resolution runs on the first call and is cached; later calls (from
    /// any thread) return the same slice.
    pub fn frames(&self) -> &[Frame] {
        self.frames
            .get_or_init(|| capture::resolve(&self.raw, self.max_frames))
    }

    /// Number of raw addresses captured at stamp time, including the
    /// machinery frames trimmed during resolution.
    #[inline]
    pub fn captured_len(&self) -> usize {
        self.raw.len()
    }
}

impl fmt::Display for Stamped {
    /// Delegates entirely to the cause — stamping never alters the message.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.cause, f)
    }
}

impl fmt::Debug for Stamped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shows the resolved frames only if someone already materialized
        // them; Debug itself must not trigger resolution.
        f.debug_struct("Stamped")
            .field("cause", &self.cause)
            .field("captured", &self.raw.len())
            .field("frames", &self.frames.get())
            .finish()
    }
}

impl Error for Stamped {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Stamped {
    /// `{ "error": <cause message>, "frames": [{name, file, line}, ..] }`.
    ///
    /// Serialization materializes the frames if nothing else has yet; the
    /// `frames` field is always present, possibly as an empty array.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Stamped", 2)?;
        state.serialize_field("error", &self.to_string())?;
        state.serialize_field("frames", self.frames())?;
        state.end()
    }
}
