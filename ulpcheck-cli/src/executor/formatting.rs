//! Output Formatting
//!
//! Status lines printed after each test. Diagnostics themselves are rendered
//! by the comparison engine while the test runs; these lines close them off.

use ulpcheck_core::FailureKind;
use ulpcheck_report::{Markers, OutputStyle};
use ulpcheck_stats::DistanceStats;

/// ` with a maximal distance of X to the reference (mean: Y).`
pub fn distance_summary(stats: &DistanceStats) -> String {
    format!(
        " with a maximal distance of {} to the reference (mean: {}).",
        stats.max(),
        stats.mean().unwrap_or(0.0)
    )
}

/// Line for a passing test, with the distance note when instrumented
pub fn pass_line(markers: &Markers, name: &str, stats: Option<&DistanceStats>) -> String {
    let mut line = format!("{}{}", markers.pass(), name);
    if let Some(stats) = stats {
        if stats.is_exact() {
            line.push_str(" all values matched the reference precisely.");
        } else {
            line.push_str(&distance_summary(stats));
        }
    }
    line
}

/// Lines closing a failed test's diagnostics
pub fn failure_lines(
    style: OutputStyle,
    markers: &Markers,
    name: &str,
    stats: Option<&DistanceStats>,
) -> Vec<String> {
    let closing = style.closing_line(markers, false, name);
    match (style, stats) {
        (_, None) => vec![closing],
        (OutputStyle::Boxed, Some(stats)) => vec![
            format!("{}│{}", markers.fail(false), distance_summary(stats)),
            closing,
        ],
        (OutputStyle::SingleLine, Some(stats)) => {
            vec![format!("{}{}", closing, distance_summary(stats))]
        }
    }
}

/// `XFAIL: name`
pub fn xfail_line(markers: &Markers, name: &str) -> String {
    format!("{}{}", markers.fail(true), name)
}

/// Lines for a test that was expected to fail but passed
pub fn unexpected_pass_lines(markers: &Markers, name: &str) -> Vec<String> {
    vec![
        format!("{}{}", markers.unexpected_pass(), name),
        format!("{}{}", markers.fail(false), FailureKind::ExpectedFailureViolated),
    ]
}

/// ` SKIP: name (reason)`
pub fn skip_line(markers: &Markers, name: &str, reason: &str) -> String {
    format!("{}{} ({})", markers.skip(), name, reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(values: &[f64]) -> DistanceStats {
        let mut s = DistanceStats::new();
        s.record_all(values.iter().copied());
        s
    }

    #[test]
    fn test_pass_line_variants() {
        let m = Markers::new(false);
        assert_eq!(pass_line(&m, "add", None), " PASS: add");
        assert_eq!(
            pass_line(&m, "add", Some(&stats(&[0.0, 0.0]))),
            " PASS: add all values matched the reference precisely."
        );
        assert_eq!(
            pass_line(&m, "add", Some(&stats(&[1.0, -0.5]))),
            " PASS: add with a maximal distance of 1 to the reference (mean: 0.75)."
        );
    }

    #[test]
    fn test_failure_lines_boxed() {
        let m = Markers::new(false);
        assert_eq!(
            failure_lines(OutputStyle::Boxed, &m, "exp", None),
            vec![" FAIL: ┕ exp"]
        );
        assert_eq!(
            failure_lines(OutputStyle::Boxed, &m, "exp", Some(&stats(&[2.0]))),
            vec![
                " FAIL: │ with a maximal distance of 2 to the reference (mean: 2).",
                " FAIL: ┕ exp",
            ]
        );
    }

    #[test]
    fn test_failure_lines_single_line() {
        let m = Markers::new(false);
        assert_eq!(
            failure_lines(OutputStyle::SingleLine, &m, "exp", Some(&stats(&[2.0]))),
            vec![" FAIL: exp with a maximal distance of 2 to the reference (mean: 2)."]
        );
    }

    #[test]
    fn test_expected_failure_lines() {
        let m = Markers::new(false);
        assert_eq!(xfail_line(&m, "broken"), "XFAIL: broken");
        assert_eq!(
            unexpected_pass_lines(&m, "broken"),
            vec![
                "unexpected PASS: broken",
                " FAIL: This test should have failed but didn't. Check the code!",
            ]
        );
        assert_eq!(skip_line(&m, "avx", "no AVX"), " SKIP: avx (no AVX)");
    }
}
