//! Lane Masks
//!
//! Exercise a masked operation with a deterministic selection of masks and
//! count every mask as its own pass.
//!
//! Run with: cargo run --example feature_masks -p ulpcheck-demos

use ulpcheck::prelude::*;
use ulpcheck_demos::select;

#[unittest]
fn select_every_mask(ctx: &mut TestContext) -> TestResult {
    let a = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    let b = [-1.0f32; 8];
    for mask in all_masks::<8>() {
        let blended = select(mask, a, b);
        let mut expected = b;
        for (lane, &set) in mask.iter().enumerate() {
            if set {
                expected[lane] = a[lane];
            }
        }
        compare!(ctx, blended, expected, "mask = {:?}", mask);
        ctx.add_pass(format!("select {:?}", mask));
    }
    Ok(())
}

#[unittest]
fn select_preserves_bits(ctx: &mut TestContext) -> TestResult {
    let a = [-0.0f64, f64::NAN];
    let b = [0.0f64, 1.0];
    let blended = select([true, true], a, b);
    // NaN != NaN and -0.0 == 0.0, so only a bitwise check is exact here
    compare_bits!(ctx, blended, a);
    compare_ne!(ctx, blended[1], a[1]);
    Ok(())
}

#[unittest]
fn select_integers(ctx: &mut TestContext) -> TestResult {
    let blended = select([false, true, false, true], [1u16, 2, 3, 4], [0; 4]);
    compare!(ctx, blended, [0, 2, 0, 4]);
    compare_quiet!(ctx, blended.iter().sum::<u16>(), 6);
    Ok(())
}

fn main() {
    ulpcheck::run()
}
