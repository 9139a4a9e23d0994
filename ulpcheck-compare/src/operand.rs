//! Operand Traits
//!
//! - `Element`: anything that can sit in a lane and be compared for equality
//! - `Scalar`: numeric elements that support error-bounded comparison
//! - `Lanes`: the shape of an operand (one lane for a scalar, N for a tuple)
//! - `RawBytes`: the in-memory representation, for bitwise comparison

use std::fmt::{Debug, Display};
use ulpcheck_stats::ulp_signed_distance;

/// Value that can occupy one lane of an operand
///
/// Every element is also a one-lane operand, so a generic `T: Element` can be
/// compared directly without wrapping it in an array.
pub trait Element: Copy + PartialEq + Debug + Lanes<Item = Self> + 'static {
    /// Lane equality as used by `equal`
    fn lane_eq(self, other: Self) -> bool {
        self == other
    }
}

/// Numeric lane type
pub trait Scalar: Element + PartialOrd + Display {
    /// Type of `|a - b|`; unsigned for signed integers so it cannot overflow
    type Diff: Copy + PartialOrd + Debug + Display;

    /// Smallest magnitude a zero reference is widened to in relative checks
    const ZERO_FLOOR: f64;

    /// `|self - other|`, computed by subtracting the smaller from the larger
    fn abs_difference(self, other: Self) -> Self::Diff;

    /// An error bound expressed as a difference; `None` if it can never hold
    fn bound(e: Self) -> Option<Self::Diff>;

    /// Widen a difference for ratio arithmetic
    fn diff_to_f64(d: Self::Diff) -> f64;

    /// Widen a value for ratio arithmetic
    fn to_f64(self) -> f64;

    /// `self - other` rendered with its sign
    fn signed_difference(self, other: Self) -> String;

    /// Signed ULP distance to `reference`; `None` for integers
    fn ulps(self, reference: Self) -> Option<f64>;
}

/// Shape of an operand
pub trait Lanes {
    /// Lane type
    type Item: Element;

    /// All lanes in order
    fn lanes(&self) -> &[Self::Item];

    /// Whether the operand is a tuple (affects how results are printed)
    fn is_tuple(&self) -> bool;
}

/// In-memory representation of an operand
pub trait RawBytes {
    /// Width of one lane, used to group hex dumps
    const LANE: usize;

    /// Native-endian bytes
    fn raw_bytes(&self) -> Vec<u8>;
}

// 32-bit x86 without SSE2 computes in 80-bit x87 registers, so exact float
// equality is not reproducible there
const DEGRADED_FLOAT_EQ: bool = cfg!(all(target_arch = "x86", not(target_feature = "sse2")));

macro_rules! impl_element {
    ($($t:ty),*) => {$(
        impl Element for $t {}
    )*};
}

macro_rules! impl_lanes {
    ($($t:ty),*) => {$(
        impl Lanes for $t {
            type Item = $t;

            fn lanes(&self) -> &[$t] {
                std::slice::from_ref(self)
            }

            fn is_tuple(&self) -> bool {
                false
            }
        }
    )*};
}

macro_rules! impl_float {
    ($($t:ty),*) => {$(
        impl Element for $t {
            fn lane_eq(self, other: Self) -> bool {
                if DEGRADED_FLOAT_EQ {
                    ulpcheck_stats::ulp_distance(self, other) <= 1.0
                } else {
                    self == other
                }
            }
        }

        impl Scalar for $t {
            type Diff = $t;
            const ZERO_FLOOR: f64 = <$t>::MIN_POSITIVE as f64;

            fn abs_difference(self, other: Self) -> $t {
                if self > other { self - other } else { other - self }
            }

            fn bound(e: Self) -> Option<$t> {
                Some(e)
            }

            fn diff_to_f64(d: $t) -> f64 {
                d as f64
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn signed_difference(self, other: Self) -> String {
                (self - other).to_string()
            }

            fn ulps(self, reference: Self) -> Option<f64> {
                Some(ulp_signed_distance(self, reference) as f64)
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl_element!($t);

        impl Scalar for $t {
            type Diff = $t;
            const ZERO_FLOOR: f64 = 0.0;

            fn abs_difference(self, other: Self) -> $t {
                if self > other { self - other } else { other - self }
            }

            fn bound(e: Self) -> Option<$t> {
                Some(e)
            }

            fn diff_to_f64(d: $t) -> f64 {
                d as f64
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn signed_difference(self, other: Self) -> String {
                if self >= other {
                    (self - other).to_string()
                } else {
                    format!("-{}", other - self)
                }
            }

            fn ulps(self, _reference: Self) -> Option<f64> {
                None
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($t:ty => $u:ty),*) => {$(
        impl_element!($t);

        impl Scalar for $t {
            type Diff = $u;
            const ZERO_FLOOR: f64 = 0.0;

            fn abs_difference(self, other: Self) -> $u {
                // Two's complement wrap-around yields the exact magnitude
                if self > other {
                    self.wrapping_sub(other) as $u
                } else {
                    other.wrapping_sub(self) as $u
                }
            }

            fn bound(e: Self) -> Option<$u> {
                if e < 0 { None } else { Some(e as $u) }
            }

            fn diff_to_f64(d: $u) -> f64 {
                d as f64
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn signed_difference(self, other: Self) -> String {
                let magnitude = self.abs_difference(other);
                if self >= other {
                    magnitude.to_string()
                } else {
                    format!("-{}", magnitude)
                }
            }

            fn ulps(self, _reference: Self) -> Option<f64> {
                None
            }
        }
    )*};
}

macro_rules! impl_raw_bytes {
    ($($t:ty),*) => {$(
        impl RawBytes for $t {
            const LANE: usize = std::mem::size_of::<$t>();

            fn raw_bytes(&self) -> Vec<u8> {
                self.to_ne_bytes().to_vec()
            }
        }
    )*};
}

impl_float!(f32, f64);
impl_unsigned!(u8, u16, u32, u64, u128, usize);
impl_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize);
impl_element!(bool, char);
impl_lanes!(
    f32, f64, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char
);
impl_raw_bytes!(f32, f64, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl RawBytes for bool {
    const LANE: usize = 1;

    fn raw_bytes(&self) -> Vec<u8> {
        vec![u8::from(*self)]
    }
}

impl RawBytes for char {
    const LANE: usize = 4;

    fn raw_bytes(&self) -> Vec<u8> {
        u32::from(*self).to_ne_bytes().to_vec()
    }
}

impl<T: RawBytes, const N: usize> RawBytes for [T; N] {
    const LANE: usize = T::LANE;

    fn raw_bytes(&self) -> Vec<u8> {
        self.iter().flat_map(RawBytes::raw_bytes).collect()
    }
}

impl<S: Element, const N: usize> Lanes for [S; N] {
    type Item = S;

    fn lanes(&self) -> &[S] {
        self
    }

    fn is_tuple(&self) -> bool {
        true
    }
}

impl<S: Element> Lanes for [S] {
    type Item = S;

    fn lanes(&self) -> &[S] {
        self
    }

    fn is_tuple(&self) -> bool {
        true
    }
}

impl<S: Element> Lanes for Vec<S> {
    type Item = S;

    fn lanes(&self) -> &[S] {
        self
    }

    fn is_tuple(&self) -> bool {
        true
    }
}

impl<L: Lanes + ?Sized> Lanes for &L {
    type Item = L::Item;

    fn lanes(&self) -> &[L::Item] {
        (**self).lanes()
    }

    fn is_tuple(&self) -> bool {
        (**self).is_tuple()
    }
}
