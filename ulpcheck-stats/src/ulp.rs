//! ULP Distance
//!
//! One ULP is the value of the least significant mantissa bit of the
//! *reference*. The distance is `|reference - value|` expressed in that unit,
//! which is not the same as counting representable values between the two:
//! crossing a power of two changes the unit on one side only. The order of the
//! arguments therefore matters.
//!
//! A value with the opposite sign of its reference reports a very large
//! distance.
//!
//! Subnormal references, infinities and NaN paired with a non-NaN are outside
//! the algorithm's domain. They are not rejected: the result is whatever the
//! arithmetic produces (typically `inf`, `NaN` or a huge finite number).

use crate::Float;

/// Distance of `value` from `reference` in units of the reference's last place.
///
/// Returns zero when the two are equal or both are NaN. A zero operand is
/// anchored to the smallest normalized magnitude and costs one extra ULP.
///
/// # Examples
///
/// ```
/// # use ulpcheck_stats::ulp_distance;
/// let next = f32::from_bits(1.0f32.to_bits() + 1);
/// assert_eq!(ulp_distance(next, 1.0), 1.0);
/// ```
pub fn ulp_distance<T: Float>(value: T, reference: T) -> T {
    if value == reference || (value.is_nan() && reference.is_nan()) {
        return T::ZERO;
    }
    if reference == T::ZERO {
        return T::ONE + ulp_distance(value.abs(), T::MIN_POSITIVE);
    }
    if value == T::ZERO {
        return T::ONE + ulp_distance(T::MIN_POSITIVE, reference.abs());
    }

    // reference == m * 2^exp with 0.5 <= |m| < 1, so one ULP is 2^(exp - DIGITS)
    let (_, exp) = reference.frexp();
    (reference - value).abs().ldexp(T::DIGITS - exp)
}

/// [`ulp_distance`] carrying the sign of `value - reference`
pub fn ulp_signed_distance<T: Float>(value: T, reference: T) -> T {
    let distance = ulp_distance(value, reference);
    if value - reference < T::ZERO {
        -distance
    } else {
        distance
    }
}
