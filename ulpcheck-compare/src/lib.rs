#![warn(missing_docs)]
//! ulpcheck Compare - Comparison Engine
//!
//! Every check is a plain function returning an [`Outcome`]. A passing
//! outcome costs nothing beyond the comparison itself; a failing one carries
//! the diagnostic text, which is printed only when the outcome is finished
//! against the run's [`TestContext`](ulpcheck_core::TestContext).
//!
//! Operands are scalars or tuples of scalars (`[T; N]`, `Vec<T>`, slices),
//! compared lane by lane.

mod bits;
mod equality;
mod operand;
mod outcome;
mod tolerance;

pub use bits::{bitwise, hex_dump};
pub use equality::{equal, equal_quiet, expect_panic, fail, not_equal, verify};
pub use operand::{Element, Lanes, RawBytes, Scalar};
pub use outcome::{Outcome, Site};
pub use tolerance::{absolute_error, fuzzy, relative_error};
