//! Error Bounds
//!
//! Absolute and relative error checks. Unsigned operands are compared without
//! wrapping, and a zero reference gets a floor instead of a zero-width bound.
//!
//! Run with: cargo run --example feature_bounds -p ulpcheck-demos

use ulpcheck::prelude::*;
use ulpcheck_demos::{dot, exp_approx, horner, mean, midpoint};

#[unittest]
fn midpoint_within_one(ctx: &mut TestContext) -> TestResult {
    for (a, b) in [(0u32, 10u32), (7, 3), (u32::MAX, 1), (u32::MAX, u32::MAX)] {
        let exact = ((a as u64 + b as u64) / 2) as u32;
        compare_abs!(ctx, midpoint(a, b), exact, 1, "a = {}, b = {}", a, b);
    }
    Ok(())
}

#[unittest]
fn polynomial_relative(ctx: &mut TestContext) -> TestResult {
    // Truncated series of e^x: good to about 3e-6 on [-0.5, 0.5]
    let series = [1.0, 1.0, 0.5, 1.0 / 6.0, 1.0 / 24.0, 1.0 / 120.0, 1.0 / 720.0];
    for i in -10..=10 {
        let x = i as f64 * 0.05;
        compare_rel!(ctx, horner(&series, x), x.exp(), 1e-5, "x = {}", x);
    }
    Ok(())
}

#[unittest]
fn vector_relative(ctx: &mut TestContext) -> TestResult {
    let xs = [-2.0, -0.5, 0.0, 0.5, 2.0];
    let values = xs.map(exp_approx);
    let reference = xs.map(f64::exp);
    compare_rel!(ctx, values, reference, 1e-14);
    Ok(())
}

#[unittest]
fn statistics(ctx: &mut TestContext) -> TestResult {
    let samples: Vec<f64> = (1..=100).map(|i| i as f64 * 0.1).collect();
    compare_abs!(ctx, mean(&samples)?, 5.05, 1e-12);

    let ones = vec![1.0; samples.len()];
    compare_rel!(ctx, dot(&samples, &ones)?, 505.0, 1e-13);
    Ok(())
}

#[unittest]
fn zero_reference_floor(ctx: &mut TestContext) -> TestResult {
    // Anything within 1% of the smallest normal counts as zero
    let residual = f32::MIN_POSITIVE * 0.001;
    compare_rel!(ctx, residual, 0.0, 0.01);
    compare_abs!(ctx, -3i32, 3, 6);
    Ok(())
}

fn main() {
    ulpcheck::run()
}
