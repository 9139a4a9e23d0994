//! Exact Checks
//!
//! Equality, inequality, plain conditions and unconditional failure.

use crate::{Element, Lanes, Outcome, Site};
use std::fmt::{Debug, Display};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Every lane of `a` equals the corresponding lane of `b`
///
/// On failure the diagnostic shows both operands and the per-lane result of
/// `==`.
pub fn equal<V: Lanes + Debug + ?Sized>(site: Site, a: &V, b: &V) -> Outcome {
    equality(site, a, b, true)
}

/// Like [`equal`], without printing the operator result
pub fn equal_quiet<V: Lanes + Debug + ?Sized>(site: Site, a: &V, b: &V) -> Outcome {
    equality(site, a, b, false)
}

fn equality<V: Lanes + Debug + ?Sized>(site: Site, a: &V, b: &V, show_result: bool) -> Outcome {
    let (la, lb) = match paired_lanes(site, a, b) {
        Ok(lanes) => lanes,
        Err(outcome) => return outcome,
    };
    if la.iter().zip(lb).all(|(x, y)| x.lane_eq(*y)) {
        return Outcome::pass();
    }

    let mut d = site.diagnostic();
    d.push("\n").push(&site.operands(a, "==", b));
    if show_result {
        let mask: Vec<bool> = la.iter().zip(lb).map(|(x, y)| x.lane_eq(*y)).collect();
        d.push(" -> ").push(&mask_text(a.is_tuple(), &mask));
    }
    Outcome::failure(d)
}

/// Every lane of `a` differs from the corresponding lane of `b`
pub fn not_equal<V: Lanes + Debug + ?Sized>(site: Site, a: &V, b: &V) -> Outcome {
    let (la, lb) = match paired_lanes(site, a, b) {
        Ok(lanes) => lanes,
        Err(outcome) => return outcome,
    };
    if la.iter().zip(lb).all(|(x, y)| !x.lane_eq(*y)) {
        return Outcome::pass();
    }

    let mut d = site.diagnostic();
    d.push("\n").push(&site.operands(a, "!=", b));
    let mask: Vec<bool> = la.iter().zip(lb).map(|(x, y)| !x.lane_eq(*y)).collect();
    d.push(" -> ").push(&mask_text(a.is_tuple(), &mask));
    Outcome::failure(d)
}

/// `condition` holds; the diagnostic repeats its source text
pub fn verify(site: Site, condition: bool) -> Outcome {
    if condition {
        return Outcome::pass();
    }
    let mut d = site.diagnostic();
    d.push(site.lhs);
    Outcome::failure(d)
}

/// Unconditional failure with a message
pub fn fail(site: Site, message: impl Display) -> Outcome {
    let mut d = site.diagnostic();
    d.push(&message.to_string());
    Outcome::failure(d)
}

/// `f` panics; a normal return is the failure
pub fn expect_panic(site: Site, f: impl FnOnce()) -> Outcome {
    if catch_unwind(AssertUnwindSafe(f)).is_err() {
        return Outcome::pass();
    }
    let mut d = site.diagnostic();
    d.push(&format!("{} did not fail as was expected", site.lhs));
    Outcome::failure(d)
}

/// Lanes of two operands, or a failed outcome if their shapes differ
pub(crate) fn paired_lanes<'a, V: Lanes + ?Sized>(
    site: Site,
    a: &'a V,
    b: &'a V,
) -> Result<(&'a [V::Item], &'a [V::Item]), Outcome> {
    let (la, lb) = (a.lanes(), b.lanes());
    if la.len() == lb.len() {
        return Ok((la, lb));
    }
    let mut d = site.diagnostic();
    d.push(&format!(
        "\n{} has {} lanes but {} has {}",
        site.lhs,
        la.len(),
        site.rhs,
        lb.len()
    ));
    Err(Outcome::failure(d))
}

/// `false` for a scalar, `[true, false, ...]` for a tuple
pub(crate) fn mask_text(tuple: bool, mask: &[bool]) -> String {
    if tuple {
        format!("{:?}", mask)
    } else {
        mask.iter().all(|&m| m).to_string()
    }
}

/// Per-lane values: bare for a scalar, bracketed for a tuple
pub(crate) fn lanes_text<T: Display>(tuple: bool, values: &[T]) -> String {
    let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
    if tuple {
        format!("[{}]", parts.join(", "))
    } else {
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> Site {
        Site::new("eq.rs", 1, "a", "b")
    }

    fn lines(outcome: &Outcome) -> Vec<String> {
        outcome.diagnostic().map(|d| d.lines().to_vec()).unwrap_or_default()
    }

    #[test]
    fn test_equal_scalars() {
        assert!(equal(site(), &3, &3).passed());

        let o = equal(site(), &1.5f64, &2.5);
        assert!(!o.passed());
        assert_eq!(lines(&o), vec!["", "a (1.5) == b (2.5) -> false"]);
    }

    #[test]
    fn test_equal_tuple_mask() {
        let o = equal(site(), &[1, 2, 3], &[1, 5, 3]);
        assert_eq!(
            lines(&o),
            vec!["", "a ([1, 2, 3]) == b ([1, 5, 3]) -> [true, false, true]"]
        );
    }

    #[test]
    fn test_equal_quiet_omits_result() {
        let o = equal_quiet(site(), &'x', &'y');
        assert_eq!(lines(&o), vec!["", "a ('x') == b ('y')"]);
    }

    #[test]
    fn test_shape_mismatch() {
        let o = equal(site(), &vec![1.0f32, 2.0], &vec![1.0]);
        assert_eq!(lines(&o), vec!["", "a has 2 lanes but b has 1"]);
    }

    #[test]
    fn test_not_equal_every_lane() {
        assert!(not_equal(site(), &[1, 2], &[3, 4]).passed());
        assert!(!not_equal(site(), &[1, 2], &[1, 4]).passed());
        assert!(!not_equal(site(), &true, &true).passed());
    }

    #[test]
    fn test_verify_and_fail() {
        let s = Site::new("v.rs", 4, "x > 0", "");
        assert!(verify(s, true).passed());
        assert_eq!(lines(&verify(s, false)), vec!["x > 0"]);
        assert_eq!(lines(&fail(s, "unreachable branch")), vec!["unreachable branch"]);
    }

    #[test]
    fn test_expect_panic() {
        let s = Site::new("p.rs", 2, "divide(1, 0)", "");
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {}));
        let panicked = expect_panic(s, || panic!("division by zero"));
        std::panic::set_hook(hook);
        assert!(panicked.passed());

        let o = expect_panic(s, || {});
        assert_eq!(lines(&o), vec!["divide(1, 0) did not fail as was expected"]);
    }

    #[test]
    fn test_text_helpers() {
        assert_eq!(mask_text(false, &[false]), "false");
        assert_eq!(mask_text(true, &[true, false]), "[true, false]");
        assert_eq!(lanes_text(false, &[2.5]), "2.5");
        assert_eq!(lanes_text(true, &[1, -2]), "[1, -2]");
    }
}
