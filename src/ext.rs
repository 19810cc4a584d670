//! Extension trait for stamping and wrapping through `Result` chains.

use crate::capture::StampConfig;
use crate::{BoxError, stamp_with, wrap};

/// Stamp or wrap the error side of a `Result` without `map_err` boilerplate.
///
/// `Ok` values pass through untouched — stamping the absence of an error is a
/// no-op with no allocation or capture.
///
/// ## Example
///
/// ```rust
/// use stackstamp::{BoxError, ResultStampExt};
///
/// fn parse(input: &str) -> Result<u32, BoxError> {
///     input
///         .parse::<u32>()
///         .stamp()
///         .wrap_err("parsing replica count")
/// }
///
/// assert_eq!(parse("3").unwrap(), 3);
/// let err = parse("x").unwrap_err();
/// assert!(err.to_string().starts_with("parsing replica count: "));
/// ```
pub trait ResultStampExt<T>: Sized {
    /// Stamp the error with the current call stack (default config).
    /// No-op if the error already carries a stamp anywhere in its tree.
    fn stamp(self) -> Result<T, BoxError>;

    /// Stamp the error with an explicit [`StampConfig`].
    fn stamp_with(self, config: &StampConfig) -> Result<T, BoxError>;

    /// Wrap the error with a context message. Stack-transparent: an existing
    /// stamp below the wrapper stays reachable.
    fn wrap_err(self, msg: impl Into<String>) -> Result<T, BoxError>;
}

impl<T, E> ResultStampExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    #[inline]
    fn stamp(self) -> Result<T, BoxError> {
        self.map_err(crate::stamp)
    }

    #[inline]
    fn stamp_with(self, config: &StampConfig) -> Result<T, BoxError> {
        self.map_err(|err| stamp_with(err, config))
    }

    #[inline]
    fn wrap_err(self, msg: impl Into<String>) -> Result<T, BoxError> {
        self.map_err(|err| wrap(msg, err))
    }
}
