//! Tolerant Checks
//!
//! Fuzzy comparison in ULPs against the reference, and comparison within an
//! absolute or relative error bound. The second operand is always the
//! reference.

use crate::equality::{lanes_text, mask_text, paired_lanes};
use crate::{Element, Lanes, Outcome, Scalar, Site};
use std::fmt::Debug;
use ulpcheck_core::TestContext;
use ulpcheck_stats::{Float, ulp_signed_distance};

/// Every lane of `a` is within the context's tolerance (in ULPs) of `b`
///
/// Each lane's signed distance is recorded into the context's instrumentation
/// and plot sink whether or not the check passes.
pub fn fuzzy<V>(ctx: &mut TestContext, site: Site, a: &V, b: &V) -> Outcome
where
    V: Lanes + Debug + ?Sized,
    V::Item: Float,
{
    let (la, lb) = match paired_lanes(site, a, b) {
        Ok(lanes) => lanes,
        Err(outcome) => return outcome,
    };
    let tolerance = ctx.fuzziness(<V::Item as Float>::KIND);

    let mut distances = Vec::with_capacity(la.len());
    let mut within = true;
    for (&value, &reference) in la.iter().zip(lb) {
        let signed = ulp_signed_distance(value, reference);
        ctx.record_fuzzy(reference, signed);
        // NaN distances compare false and fail the check
        within &= signed.abs().to_f64() <= tolerance;
        distances.push(signed);
    }
    if within {
        return Outcome::pass();
    }

    let tuple = a.is_tuple();
    let mask: Vec<bool> = la.iter().zip(lb).map(|(x, y)| x.lane_eq(*y)).collect();
    let mut d = site.diagnostic();
    d.push("\n")
        .push(&site.operands(a, "≈", b))
        .push(" -> ")
        .push(&mask_text(tuple, &mask));
    d.line(&format!(
        "distance: {}, allowed distance: {}",
        lanes_text(tuple, &distances),
        tolerance
    ));
    Outcome::failure(d)
}

/// Every lane satisfies `|a - b| <= e`
pub fn absolute_error<V>(site: Site, a: &V, b: &V, e: V::Item) -> Outcome
where
    V: Lanes + Debug + ?Sized,
    V::Item: Scalar,
{
    let (la, lb) = match paired_lanes(site, a, b) {
        Ok(lanes) => lanes,
        Err(outcome) => return outcome,
    };
    let bound = <V::Item as Scalar>::bound(e);
    let holds = |x: V::Item, y: V::Item| bound.is_some_and(|limit| x.abs_difference(y) <= limit);
    if la.iter().zip(lb).all(|(&x, &y)| holds(x, y)) {
        return Outcome::pass();
    }

    let tuple = a.is_tuple();
    let differences: Vec<String> = la
        .iter()
        .zip(lb)
        .map(|(&x, &y)| x.signed_difference(y))
        .collect();
    let mut d = site.diagnostic();
    d.push("\n").push(&site.operands(a, "≈", b));
    d.line(&format!(
        "difference: {}, allowed difference: ±{}",
        lanes_text(tuple, &differences),
        e
    ));
    let ulps: Option<Vec<f64>> = la.iter().zip(lb).map(|(&x, &y)| x.ulps(y)).collect();
    if let Some(ulps) = ulps {
        d.line(&format!("distance: {} ulp", lanes_text(tuple, &ulps)));
    }
    Outcome::failure(d)
}

/// Every lane satisfies `|a - b| <= e * |b|`
///
/// A zero reference lane is widened to the smallest normal magnitude for
/// floats and to zero for integers.
pub fn relative_error<V>(site: Site, a: &V, b: &V, e: f64) -> Outcome
where
    V: Lanes + Debug + ?Sized,
    V::Item: Scalar,
{
    let (la, lb) = match paired_lanes(site, a, b) {
        Ok(lanes) => lanes,
        Err(outcome) => return outcome,
    };

    let rows: Vec<(f64, f64)> = la
        .iter()
        .zip(lb)
        .map(|(&x, &y)| {
            let diff = <V::Item as Scalar>::diff_to_f64(x.abs_difference(y));
            let magnitude = y.to_f64().abs();
            let bound = if magnitude == 0.0 {
                e * <V::Item as Scalar>::ZERO_FLOOR
            } else {
                e * magnitude
            };
            (diff, bound)
        })
        .collect();
    if rows.iter().all(|&(diff, bound)| diff <= bound) {
        return Outcome::pass();
    }

    let tuple = a.is_tuple();
    let relative: Vec<f64> = la
        .iter()
        .zip(&rows)
        .zip(lb)
        .map(|((_, &(diff, _)), &y)| diff / y.to_f64().abs())
        .collect();
    let absolute: Vec<f64> = rows.iter().map(|&(diff, _)| diff).collect();
    let bounds: Vec<f64> = rows.iter().map(|&(_, bound)| bound).collect();

    let mut d = site.diagnostic();
    d.push("\n").push(&site.operands(a, "≈", b));
    d.line(&format!(
        "relative difference: {}, allowed: ±{}",
        lanes_text(tuple, &relative),
        e
    ));
    d.line(&format!(
        "absolute difference: {}, allowed: ±{}",
        lanes_text(tuple, &absolute),
        lanes_text(tuple, &bounds)
    ));
    Outcome::failure(d)
}
