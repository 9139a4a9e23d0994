//! ulpcheck testing itself through its own runner
//!
//! Built with `harness = false`: every `#[unittest]` below is discovered and
//! run the same way a user's test binary would. The process fails if any test
//! does, so expected failures and skips must be reported as such.

use std::num::ParseIntError;
use ulpcheck::prelude::*;
use ulpcheck::{Cli, ColorChoice, Element, Registry, ulp_signed_distance};

fn next_up<T: Float>(x: T) -> T {
    // Scale by one ULP of a value in [1, 2)
    let (_, e) = x.frexp();
    x + T::ONE.ldexp(e - T::DIGITS)
}

#[unittest]
fn fuzzy_default_tolerance(ctx: &mut TestContext) -> TestResult {
    fuzzy_compare!(ctx, next_up(1.0f32), 1.0);
    fuzzy_compare!(ctx, next_up(1.0f64), 1.0);
    Ok(())
}

#[unittest]
fn fuzzy_two_ulp_fails(ctx: &mut TestContext) -> TestResult {
    ctx.expect_failure();
    fuzzy_compare!(ctx, next_up(next_up(1.0f32)), 1.0);
    Ok(())
}

#[unittest(types(f32, f64))]
fn signed_distance_below_reference<T: Float + Element>(ctx: &mut TestContext) -> TestResult {
    let above = next_up(T::ONE);
    compare!(ctx, ulp_signed_distance(T::ONE, above), -T::ONE);
    Ok(())
}

#[unittest(types(f32, f64))]
fn fuzzy_generic_one_ulp<T: Float + Element>(ctx: &mut TestContext) -> TestResult {
    fuzzy_compare!(ctx, next_up(T::ONE), T::ONE);
    Ok(())
}

#[unittest(types(f32, f64))]
fn fuzzy_generic_two_ulp_fails<T: Float + Element>(ctx: &mut TestContext) -> TestResult {
    ctx.expect_failure();
    fuzzy_compare!(ctx, next_up(next_up(T::ONE)), T::ONE);
    Ok(())
}

#[unittest]
fn absolute_error_unsigned(ctx: &mut TestContext) -> TestResult {
    compare_abs!(ctx, 3u8, 5, 2);
    compare_abs!(ctx, 5u8, 3, 2);
    Ok(())
}

#[unittest]
fn relative_error_zero_reference(ctx: &mut TestContext) -> TestResult {
    let tiny = f32::MIN_POSITIVE * 0.005;
    compare_rel!(ctx, tiny, 0.0, 0.01);
    Ok(())
}

#[unittest]
fn bitwise_negative_zero(ctx: &mut TestContext) -> TestResult {
    compare_bits!(ctx, -0.0f64, 0x8000_0000_0000_0000u64);
    compare!(ctx, -0.0f64, 0.0);
    Ok(())
}

#[unittest(raises = ParseIntError)]
fn parse_error_escapes(_ctx: &mut TestContext) -> TestResult {
    "not a number".parse::<i32>()?;
    Ok(())
}

#[unittest]
fn skipped_without_wide_lanes(_ctx: &mut TestContext) -> TestResult {
    skip!("no 64-lane tuples on this target");
}

#[unittest]
fn masks_cover_every_lane(ctx: &mut TestContext) -> TestResult {
    let mut seen = [false; 4];
    for mask in all_masks::<4>() {
        for (lane, &set) in mask.iter().enumerate() {
            seen[lane] |= set;
        }
        ctx.add_pass(format!("mask {:?}", mask));
    }
    compare!(ctx, seen, [true; 4]);
    Ok(())
}

fn main() {
    let cli = Cli {
        color: Some(ColorChoice::Never),
        ..Cli::default()
    };
    match ulpcheck::run_with_cli(cli, &Registry::discover()) {
        Ok(summary) => std::process::exit(summary.exit_code()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
