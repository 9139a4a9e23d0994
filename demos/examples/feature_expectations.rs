//! Expected Outcomes
//!
//! Tests that must fail, tests that must raise a specific error, checks that
//! must panic, and tests that skip themselves.
//!
//! Run with: cargo run --example feature_expectations -p ulpcheck-demos

use std::num::ParseFloatError;
use ulpcheck::prelude::*;
use ulpcheck_demos::{KernelError, dot, mean};

/// Known inaccuracy kept visible until the kernel is fixed
#[unittest]
fn naive_variance_cancels(ctx: &mut TestContext) -> TestResult {
    ctx.expect_failure();
    let samples = [1e8 + 1.0, 1e8 + 2.0, 1e8 + 3.0];
    let n = samples.len() as f64;
    let mean_sq = samples.iter().map(|x| x * x).sum::<f64>() / n;
    let sq_mean = (samples.iter().sum::<f64>() / n).powi(2);
    fuzzy_compare!(ctx, mean_sq - sq_mean, 2.0 / 3.0);
    Ok(())
}

#[unittest(raises = KernelError)]
fn mean_of_nothing(_ctx: &mut TestContext) -> TestResult {
    mean(&[])?;
    Ok(())
}

#[unittest(name = "dot rejects ragged input", raises = KernelError)]
fn dot_ragged(_ctx: &mut TestContext) -> TestResult {
    dot(&[1.0, 2.0], &[1.0])?;
    Ok(())
}

#[unittest(raises = ParseFloatError)]
fn parse_reference(ctx: &mut TestContext) -> TestResult {
    let reference: f64 = "2.718281828459045".parse()?;
    fuzzy_compare!(ctx, 1.0f64.exp(), reference);
    let _: f64 = "e".parse()?;
    Ok(())
}

#[unittest]
fn out_of_bounds_panics(ctx: &mut TestContext) -> TestResult {
    let lanes = [1.0f32; 4];
    let index = std::hint::black_box(lanes.len());
    expect_panic!(ctx, lanes[index] + 1.0);
    Ok(())
}

#[unittest]
fn needs_wide_registers(ctx: &mut TestContext) -> TestResult {
    if std::mem::size_of::<usize>() < 8 {
        skip!("{}-bit target", usize::BITS);
    }
    verify!(ctx, usize::BITS >= 64);
    Ok(())
}

fn main() {
    ulpcheck::run()
}
