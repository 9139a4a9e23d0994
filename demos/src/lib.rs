//! ulpcheck Demos
//!
//! Small numerical kernels and the test binaries that check them. This crate
//! is not published; it exists to host runnable examples that depend on
//! `ulpcheck`.
//!
//! Run any example with:
//! ```sh
//! cargo run --example <name> -p ulpcheck-demos -- --maxdist
//! ```
//!
//! | Example | Feature |
//! |---------|---------|
//! | `feature_fuzzy` | ULP tolerance, typed tests, `--maxdist`, `--plotdist` |
//! | `feature_bounds` | Absolute and relative error bounds, integer operands |
//! | `feature_expectations` | Expected failures, expected errors, panics, skips |
//! | `feature_masks` | Lane masks, extra passes, bitwise checks |
//! | `explicit_registry` | Registering tests without the attribute |

use thiserror::Error;
use ulpcheck::Float;

/// Kernel input errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    /// The input was empty
    #[error("empty input")]
    Empty,
    /// Two inputs that must pair up did not
    #[error("length mismatch: {0} vs {1}")]
    LengthMismatch(usize, usize),
}

/// Evaluate `c[0] + c[1] x + c[2] x^2 + ...` with Horner's scheme
pub fn horner<T: Float>(coefficients: &[T], x: T) -> T {
    coefficients
        .iter()
        .rev()
        .fold(T::ZERO, |acc, &c| acc * x + c)
}

/// Left-to-right summation
pub fn naive_sum<T: Float>(values: &[T]) -> T {
    values.iter().fold(T::ZERO, |acc, &v| acc + v)
}

/// Compensated summation
pub fn kahan_sum<T: Float>(values: &[T]) -> T {
    let mut sum = T::ZERO;
    let mut compensation = T::ZERO;
    for &v in values {
        let y = v - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }
    sum
}

/// Linear interpolation, exact at `t == 0` and `t == 1`
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a * (T::ONE - t) + b * t
}

const LN2_HI: f64 = 6.931_471_803_691_238_164_90e-01;
const LN2_LO: f64 = 1.908_214_929_270_587_700_02e-10;

/// `e^x` by range reduction and a degree-13 Taylor polynomial
///
/// Accurate to a few ULPs for `|x| < 700`.
pub fn exp_approx(x: f64) -> f64 {
    let k = (x / std::f64::consts::LN_2).round();
    let r = (x - k * LN2_HI) - k * LN2_LO;

    let mut term = 1.0;
    let mut coefficients = [0.0; 14];
    for (n, c) in coefficients.iter_mut().enumerate() {
        if n > 0 {
            term /= n as f64;
        }
        *c = term;
    }
    horner(&coefficients, r).ldexp(k as i32)
}

/// Single precision `e^x`, evaluated in double precision
pub fn exp_approx_f32(x: f32) -> f32 {
    exp_approx(x as f64) as f32
}

/// `1 / sqrt(x)` from a bit-level seed refined by three Newton steps
pub fn rsqrt(x: f32) -> f32 {
    let mut y = f32::from_bits(0x5f37_59df - (x.to_bits() >> 1));
    for _ in 0..3 {
        y = y * (1.5 - 0.5 * x * y * y);
    }
    y
}

/// Lane-wise select: `a` where the mask is set, `b` elsewhere
pub fn select<T: Copy, const N: usize>(mask: [bool; N], a: [T; N], b: [T; N]) -> [T; N] {
    std::array::from_fn(|i| if mask[i] { a[i] } else { b[i] })
}

/// Average of two integers without intermediate overflow, rounded down
pub fn midpoint(a: u32, b: u32) -> u32 {
    (a & b) + ((a ^ b) >> 1)
}

/// Arithmetic mean
pub fn mean(values: &[f64]) -> Result<f64, KernelError> {
    if values.is_empty() {
        return Err(KernelError::Empty);
    }
    Ok(kahan_sum(values) / values.len() as f64)
}

/// Inner product of two equally long slices
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64, KernelError> {
    if a.len() != b.len() {
        return Err(KernelError::LengthMismatch(a.len(), b.len()));
    }
    let products: Vec<f64> = a.iter().zip(b).map(|(x, y)| x * y).collect();
    Ok(kahan_sum(&products))
}
