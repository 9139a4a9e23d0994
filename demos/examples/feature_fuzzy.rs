//! Fuzzy Comparison
//!
//! Compares approximations against reference values in units of the
//! reference's last place.
//!
//! Run with:
//!   cargo run --example feature_fuzzy -p ulpcheck-demos
//!   cargo run --example feature_fuzzy -p ulpcheck-demos -- --maxdist
//!   cargo run --example feature_fuzzy -p ulpcheck-demos -- --plotdist exp.dat
//!   cargo run --example feature_fuzzy -p ulpcheck-demos -- --only "lerp<f32>"

use ulpcheck::prelude::*;
use ulpcheck::{Element, ulp_distance};
use ulpcheck_demos::{exp_approx, exp_approx_f32, kahan_sum, lerp, naive_sum, rsqrt};

/// Sample points spread over the reduced range and beyond
fn sample_points() -> impl Iterator<Item = f64> {
    (-400..=400).map(|i| i as f64 * 0.05)
}

#[unittest]
fn exp_double(ctx: &mut TestContext) -> TestResult {
    ctx.set_fuzziness_for::<f64>(8.0);
    for x in sample_points() {
        fuzzy_compare!(ctx, exp_approx(x), x.exp(), "x = {}", x);
    }
    Ok(())
}

#[unittest]
fn exp_single(ctx: &mut TestContext) -> TestResult {
    for x in sample_points().map(|x| x as f32) {
        let reference = (x as f64).exp() as f32;
        fuzzy_compare!(ctx, exp_approx_f32(x), reference, "x = {}", x);
    }
    Ok(())
}

#[unittest]
fn rsqrt_newton(ctx: &mut TestContext) -> TestResult {
    ctx.set_fuzziness_for::<f32>(4.0);
    let inputs: Vec<f32> = (1..=64).map(|i| i as f32 * 0.375).collect();
    let values: Vec<f32> = inputs.iter().map(|&x| rsqrt(x)).collect();
    let reference: Vec<f32> = inputs
        .iter()
        .map(|&x| (1.0 / (x as f64).sqrt()) as f32)
        .collect();
    fuzzy_compare!(ctx, values, reference);
    Ok(())
}

#[unittest(types(f32, f64))]
fn lerp_end_points<T: Float + Element>(ctx: &mut TestContext) -> TestResult {
    let (a, b) = (T::ONE, T::ONE + T::ONE + T::ONE);
    compare!(ctx, [lerp(a, b, T::ZERO), lerp(a, b, T::ONE)], [a, b]);
    Ok(())
}

#[unittest]
fn summation_order(ctx: &mut TestContext) -> TestResult {
    let values: Vec<f32> = (1..=1000).map(|i| 1.0 / i as f32).collect();
    let reference = values.iter().map(|&v| v as f64).sum::<f64>() as f32;

    // Compensated summation should be within one ULP of the wide sum
    fuzzy_compare!(ctx, kahan_sum(&values), reference);

    // Naive summation drifts further
    let naive = naive_sum(&values);
    verify!(
        ctx,
        ulp_distance(naive, reference) >= ulp_distance(kahan_sum(&values), reference),
        "naive sum {} vs reference {}",
        naive,
        reference
    );
    Ok(())
}

fn main() {
    ulpcheck::run()
}
