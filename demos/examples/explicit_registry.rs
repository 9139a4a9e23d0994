//! Explicit Registration
//!
//! Builds the registry by hand instead of with `#[unittest]`. Useful when the
//! set of tests is computed at run time.
//!
//! Run with: cargo run --example explicit_registry -p ulpcheck-demos -- --vim

use ulpcheck::prelude::*;
use ulpcheck::{Element, Registry, TypeInstance};
use ulpcheck_demos::{KernelError, horner, mean};

fn horner_constant(ctx: &mut TestContext) -> TestResult {
    compare!(ctx, horner(&[4.5f64], 123.0), 4.5);
    Ok(())
}

fn horner_linear<T: Float + Element>(ctx: &mut TestContext) -> TestResult {
    // 1 + x at x = 1
    let two = horner(&[T::ONE, T::ONE], T::ONE);
    fuzzy_compare!(ctx, two, T::ONE + T::ONE);
    Ok(())
}

fn empty_mean(_ctx: &mut TestContext) -> TestResult {
    mean(&[])?;
    Ok(())
}

fn main() {
    let mut registry = Registry::new();
    registry
        .register("horner_constant", horner_constant)
        .register_typed(
            "horner_linear",
            &[
                TypeInstance::of::<f32>(horner_linear::<f32>),
                TypeInstance::of::<f64>(horner_linear::<f64>),
            ],
        )
        .register_raising::<KernelError>("empty_mean", empty_mean);
    ulpcheck::run_registry(registry)
}
