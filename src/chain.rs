//! Iterator over an error's single-cause chain.

use std::error::Error;

/// Iterate over `err` and its transitive `source()` links, outermost first.
///
/// This is the `Is`/`As`-style building block: combine with `is::<T>()` or
/// `downcast_ref::<T>()` to check whether anything in the chain matches a
/// type, regardless of how many wrappers sit above it.
///
/// ```rust
/// use stackstamp::{chain, stamp, wrap};
///
/// let err = wrap("outer", stamp(std::io::Error::other("inner")));
/// assert!(chain(err.as_ref()).any(|e| e.is::<std::io::Error>()));
/// ```
#[inline]
pub fn chain<'a>(err: &'a (dyn Error + 'static)) -> Chain<'a> {
    Chain { next: Some(err) }
}

/// Iterator returned by [`chain()`].
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.source();
        Some(current)
    }
}
