//! Bitwise Checks

use crate::{Outcome, RawBytes, Site};
use std::fmt::{Debug, Write};

/// `a` and `b` have identical in-memory representations
///
/// Both operands must have the same size; a mismatch is rejected at compile
/// time. On failure both byte sequences are dumped in hex, grouped by lane.
pub fn bitwise<A, B>(site: Site, a: &A, b: &B) -> Outcome
where
    A: RawBytes + Debug,
    B: RawBytes + Debug,
{
    const {
        assert!(
            std::mem::size_of::<A>() == std::mem::size_of::<B>(),
            "bitwise comparison of operands with different sizes"
        )
    };

    let (ba, bb) = (a.raw_bytes(), b.raw_bytes());
    if ba == bb {
        return Outcome::pass();
    }

    let mut d = site.diagnostic();
    d.push("\n")
        .push(&site.operands(a, "==", b))
        .push(" -> false");
    d.line(&format!("{}: {}", site.lhs, hex_dump(&ba, A::LANE)));
    d.line(&format!("{}: {}", site.rhs, hex_dump(&bb, B::LANE)));
    d.line(&format!("byte order: {}", native_endianness()));
    Outcome::failure(d)
}

/// Lowercase hex, one space-separated group per `group` bytes
pub fn hex_dump(bytes: &[u8], group: usize) -> String {
    let group = group.max(1);
    let mut out = String::with_capacity(bytes.len() * 2 + bytes.len() / group);
    for (i, chunk) in bytes.chunks(group).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        for byte in chunk {
            // Writing to a String cannot fail
            let _ = write!(out, "{:02x}", byte);
        }
    }
    out
}

fn native_endianness() -> &'static str {
    if cfg!(target_endian = "little") {
        "little-endian"
    } else {
        "big-endian"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> Site {
        Site::new("bits.rs", 3, "x", "y")
    }

    #[test]
    fn test_hex_dump_groups() {
        assert_eq!(hex_dump(&[0xde, 0xad, 0xbe, 0xef], 2), "dead beef");
        assert_eq!(hex_dump(&[1, 2, 3], 1), "01 02 03");
        assert_eq!(hex_dump(&[], 4), "");
        assert_eq!(hex_dump(&[0xff], 0), "ff");
    }

    #[test]
    fn test_same_bits_pass() {
        assert!(bitwise(site(), &1.0f32, &0x3f80_0000u32).passed());
        assert!(bitwise(site(), &[1u16, 2], &[1u16, 2]).passed());
    }

    #[test]
    fn test_signed_zero_differs_bitwise() {
        let o = bitwise(site(), &0.0f64, &-0.0f64);
        let lines = o.diagnostic().unwrap().lines();
        assert_eq!(lines[1], "x (0.0) == y (-0.0) -> false");
        assert_eq!(lines.len(), 5);
        assert!(lines[4].starts_with("byte order: "));
    }

    #[test]
    fn test_dump_uses_lane_width() {
        let o = bitwise(site(), &[1u16, 2], &[1u16, 3]);
        let lines = o.diagnostic().unwrap().lines();
        let expected = hex_dump(&[1u16, 2].raw_bytes(), 2);
        assert_eq!(lines[2], format!("x: {}", expected));
        assert_eq!(expected.split(' ').count(), 2);
    }
}
