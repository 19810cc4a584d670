//! Convenient re-exports for common usage.
//!
//! Covers the producer side (stamping and composing errors) and the consumer
//! side (collecting traces).
//!
//! ## Usage
//!
//! ```rust
//! use stackstamp::prelude::*;
//!
//! fn inner() -> Result<(), BoxError> {
//!     Err(stamp("something broke"))
//! }
//!
//! fn outer() -> Result<(), BoxError> {
//!     inner().wrap_err("running inner step")
//! }
//!
//! let err = outer().unwrap_err();
//! assert_eq!(stack_traces(err.as_ref()).len(), 1);
//! ```

pub use crate::BoxError;
pub use crate::ResultStampExt;
pub use crate::join;
pub use crate::stack_traces;
pub use crate::stamp;
pub use crate::wrap;
