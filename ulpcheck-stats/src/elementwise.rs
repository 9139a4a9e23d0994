//! Elementwise Distances
//!
//! Applies the scalar algorithm lane by lane. Reductions such as "every lane
//! within tolerance" belong to the comparison layer, not here.

use crate::{Float, ulp_distance, ulp_signed_distance};
use thiserror::Error;

/// Errors from elementwise distance computation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UlpError {
    /// The two operands do not have the same number of lanes
    #[error("Lane count mismatch: value has {value} lanes, reference has {reference}")]
    LengthMismatch {
        /// Lanes in the value operand
        value: usize,
        /// Lanes in the reference operand
        reference: usize,
    },
}

/// Per-lane [`ulp_distance`] of two fixed-size tuples
pub fn ulp_distance_each<T: Float, const N: usize>(value: [T; N], reference: [T; N]) -> [T; N] {
    std::array::from_fn(|i| ulp_distance(value[i], reference[i]))
}

/// Per-lane [`ulp_signed_distance`] of two fixed-size tuples
pub fn ulp_signed_distance_each<T: Float, const N: usize>(
    value: [T; N],
    reference: [T; N],
) -> [T; N] {
    std::array::from_fn(|i| ulp_signed_distance(value[i], reference[i]))
}

/// Per-lane [`ulp_distance`] of two slices of equal length
pub fn ulp_distance_slice<T: Float>(value: &[T], reference: &[T]) -> Result<Vec<T>, UlpError> {
    zip_lanes(value, reference, ulp_distance)
}

/// Per-lane [`ulp_signed_distance`] of two slices of equal length
pub fn ulp_signed_distance_slice<T: Float>(
    value: &[T],
    reference: &[T],
) -> Result<Vec<T>, UlpError> {
    zip_lanes(value, reference, ulp_signed_distance)
}

fn zip_lanes<T: Float>(value: &[T], reference: &[T], f: fn(T, T) -> T) -> Result<Vec<T>, UlpError> {
    if value.len() != reference.len() {
        return Err(UlpError::LengthMismatch {
            value: value.len(),
            reference: reference.len(),
        });
    }
    Ok(value
        .iter()
        .zip(reference)
        .map(|(&v, &r)| f(v, r))
        .collect())
}
