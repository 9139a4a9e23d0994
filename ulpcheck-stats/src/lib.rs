#![warn(missing_docs)]
//! ulpcheck Statistical Engine
//!
//! Pure numeric building blocks for precision-aware testing:
//! - ULP distance between a value and a reference (signed and unsigned)
//! - Elementwise distances over fixed-size lanes and slices
//! - Running maximum/mean accumulators for observed distances
//!
//! The distance is measured in units of the *reference's* last place, so the
//! metric is directional: `ulp_distance(a, b)` and `ulp_distance(b, a)` differ
//! when `a` and `b` straddle a power of two.

mod distance;
mod elementwise;
mod float;
mod ulp;

pub use distance::DistanceStats;
pub use elementwise::{
    UlpError, ulp_distance_each, ulp_distance_slice, ulp_signed_distance_each,
    ulp_signed_distance_slice,
};
pub use float::{Float, FloatKind};
pub use ulp::{ulp_distance, ulp_signed_distance};

/// Fuzzy tolerance applied to every precision kind before a test adjusts it
pub const DEFAULT_TOLERANCE: f64 = 1.0;
