//! Floating-Point Kinds
//!
//! The `Float` trait exposes exactly what the ULP algorithm needs from a
//! precision kind: its mantissa width, its smallest normalized magnitude and an
//! exact mantissa/exponent decomposition (`frexp`/`ldexp`).

use std::fmt::{Debug, Display};
use std::ops::{Add, Mul, Neg, Sub};

/// Precision kind of a floating-point scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FloatKind {
    /// IEEE 754 binary32 (`f32`)
    Single,
    /// IEEE 754 binary64 (`f64`)
    Double,
}

impl FloatKind {
    /// All kinds, in index order
    pub const ALL: [FloatKind; 2] = [FloatKind::Single, FloatKind::Double];

    /// Dense index, usable for per-kind tables
    pub fn index(self) -> usize {
        match self {
            FloatKind::Single => 0,
            FloatKind::Double => 1,
        }
    }

    /// Rust type name of the kind
    pub fn name(self) -> &'static str {
        match self {
            FloatKind::Single => "f32",
            FloatKind::Double => "f64",
        }
    }

    /// Mantissa width in bits, including the implicit leading bit
    pub fn digits(self) -> i32 {
        match self {
            FloatKind::Single => <f32 as Float>::DIGITS,
            FloatKind::Double => <f64 as Float>::DIGITS,
        }
    }
}

impl std::fmt::Display for FloatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A floating-point precision kind usable with the ULP engine
pub trait Float:
    Copy
    + PartialEq
    + PartialOrd
    + Debug
    + Display
    + Default
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Mantissa width in bits, including the implicit leading bit
    const DIGITS: i32;
    /// Which precision kind this is
    const KIND: FloatKind;
    /// Smallest positive normalized value
    const MIN_POSITIVE: Self;
    /// Positive zero
    const ZERO: Self;
    /// One
    const ONE: Self;

    /// Absolute value
    fn abs(self) -> Self;

    /// Whether the value is NaN
    fn is_nan(self) -> bool;

    /// Decompose into `(m, e)` with `self == m * 2^e` and `0.5 <= |m| < 1`.
    ///
    /// Zero, infinities and NaN are returned unchanged with exponent 0.
    fn frexp(self) -> (Self, i32);

    /// Compute `self * 2^exp` as a single exponent adjustment
    fn ldexp(self, exp: i32) -> Self;

    /// Widen to `f64` (exact for both kinds)
    fn to_f64(self) -> f64;
}

impl Float for f64 {
    const DIGITS: i32 = f64::MANTISSA_DIGITS as i32;
    const KIND: FloatKind = FloatKind::Double;
    const MIN_POSITIVE: Self = f64::MIN_POSITIVE;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    fn abs(self) -> Self {
        f64::abs(self)
    }

    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }

    fn frexp(self) -> (Self, i32) {
        let bits = self.to_bits();
        let biased = ((bits >> 52) & 0x7ff) as i32;
        match biased {
            0 => {
                if self == 0.0 {
                    return (self, 0);
                }
                // Subnormal: normalize by 2^64 first
                let (m, e) = (self * f64::from_bits(0x43f0_0000_0000_0000)).frexp();
                (m, e - 64)
            }
            0x7ff => (self, 0),
            _ => {
                let mantissa = (bits & !(0x7ff_u64 << 52)) | (0x3fe_u64 << 52);
                (f64::from_bits(mantissa), biased - 0x3fe)
            }
        }
    }

    fn ldexp(self, exp: i32) -> Self {
        scalbn(self, exp)
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl Float for f32 {
    const DIGITS: i32 = f32::MANTISSA_DIGITS as i32;
    const KIND: FloatKind = FloatKind::Single;
    const MIN_POSITIVE: Self = f32::MIN_POSITIVE;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    fn abs(self) -> Self {
        f32::abs(self)
    }

    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }

    fn frexp(self) -> (Self, i32) {
        let bits = self.to_bits();
        let biased = ((bits >> 23) & 0xff) as i32;
        match biased {
            0 => {
                if self == 0.0 {
                    return (self, 0);
                }
                // Subnormal: normalize by 2^32 first
                let (m, e) = (self * f32::from_bits(0x4f80_0000)).frexp();
                (m, e - 32)
            }
            0xff => (self, 0),
            _ => {
                let mantissa = (bits & !(0xff_u32 << 23)) | (0x7e_u32 << 23);
                (f32::from_bits(mantissa), biased - 0x7e)
            }
        }
    }

    fn ldexp(self, exp: i32) -> Self {
        // The binary64 range covers every binary32 scaling the engine performs,
        // so this rounds exactly once.
        scalbn(f64::from(self), exp) as f32
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

/// `x * 2^n` for binary64, stepping through the exponent range so that
/// intermediate powers never overflow or flush to zero early.
fn scalbn(x: f64, mut n: i32) -> f64 {
    let p1023 = f64::from_bits(0x7fe0_0000_0000_0000); // 2^1023
    let p53 = f64::from_bits(0x4340_0000_0000_0000); // 2^53
    let pm1022 = f64::from_bits(0x0010_0000_0000_0000); // 2^-1022

    let mut y = x;
    if n > 1023 {
        y *= p1023;
        n -= 1023;
        if n > 1023 {
            y *= p1023;
            n -= 1023;
            n = n.min(1023);
        }
    } else if n < -1022 {
        // Keep 53 bits of headroom so the final multiply rounds only once
        y *= pm1022 * p53;
        n += 1022 - 53;
        if n < -1022 {
            y *= pm1022 * p53;
            n += 1022 - 53;
            n = n.max(-1022);
        }
    }
    y * f64::from_bits(((0x3ff + n) as u64) << 52)
}
