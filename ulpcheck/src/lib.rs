#![warn(missing_docs)]
//! # ulpcheck
//!
//! Unit tests for numerical code, with comparisons that understand floating
//! point.
//!
//! - **ULP distance**: fuzzy comparison measures how far a value is from its
//!   reference in units of the reference's last place
//! - **Lane-wise operands**: scalars, arrays, slices and `Vec`s are compared
//!   lane by lane with a per-lane mask in the diagnostic
//! - **Error bounds**: absolute and relative error checks that work for
//!   unsigned integers without wrapping
//! - **Bitwise checks**: compare in-memory representations with a hex dump
//! - **Instrumentation**: `--maxdist` reports maximal and mean distance per
//!   test, `--plotdist` writes every measured distance to a data file
//! - **Expected failures**: a test can declare that it must fail, or that a
//!   specific error type must escape it
//!
//! ## Quick Start
//!
//! ```ignore
//! use ulpcheck::prelude::*;
//!
//! #[unittest]
//! fn sqrt_of_two(ctx: &mut TestContext) -> TestResult {
//!     fuzzy_compare!(ctx, 2.0f64.sqrt() * 2.0f64.sqrt(), 2.0);
//!     Ok(())
//! }
//!
//! fn main() {
//!     ulpcheck::run()
//! }
//! ```
//!
//! ## Typed Tests
//!
//! ```ignore
//! #[unittest(types(f32, f64))]
//! fn one_is_one<T: Float>(ctx: &mut TestContext) -> TestResult {
//!     compare!(ctx, T::ONE, T::ONE);
//!     Ok(())
//! }
//! ```
//!
//! ## Expected Errors
//!
//! ```ignore
//! #[unittest(raises = std::num::ParseIntError)]
//! fn rejects_garbage(_ctx: &mut TestContext) -> TestResult {
//!     "garbage".parse::<i32>()?;
//!     Ok(())
//! }
//! ```

mod macros;
mod masks;

pub use masks::{MAX_SET_LANES, all_masks};

// Re-export core types
pub use ulpcheck_core::{
    Descriptor, ExpectedError, FailureKind, RaisedError, Registry, RegistryError, Signal,
    TestContext, TestDef, TestFn, TestResult, TypeInstance, TypedTestDef, render_type_name, skip,
    type_name_of,
};

// Re-export the comparison engine
pub use ulpcheck_compare::{
    Element, Lanes, Outcome, RawBytes, Scalar, Site, absolute_error, bitwise, equal, equal_quiet,
    expect_panic, fail, fuzzy, hex_dump, not_equal, relative_error, verify,
};

// Re-export output types
pub use ulpcheck_report::{
    BufferConsole, Console, Diagnostic, Location, Markers, OutputStyle, PlotSink, RunSummary,
    StdoutConsole,
};

// Re-export the ULP engine
pub use ulpcheck_stats::{
    DEFAULT_TOLERANCE, DistanceStats, Float, FloatKind, UlpError, ulp_distance, ulp_distance_each,
    ulp_distance_slice, ulp_signed_distance, ulp_signed_distance_each, ulp_signed_distance_slice,
};

// Re-export the registration attribute
pub use ulpcheck_macros::unittest;

/// Internal re-exports for macro use
#[doc(hidden)]
pub mod internal {
    pub use inventory;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Float, FloatKind, TestContext, TestResult, all_masks, compare, compare_abs, compare_bits,
        compare_ne, compare_quiet, compare_rel, expect_panic, fail, fuzzy_compare, skip,
        unittest, verify,
    };
}

/// Run every `#[unittest]` linked into the binary and exit.
///
/// Call this as the body of your test binary's `main()`:
/// ```ignore
/// fn main() {
///     ulpcheck::run()
/// }
/// ```
pub use ulpcheck_cli::run;

pub use ulpcheck_cli::{
    Cli, ColorChoice, RunSettings, UlpcheckConfig, run_registry, run_with_cli, run_with_console,
};
