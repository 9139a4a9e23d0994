//! Test Execution
//!
//! Runs planned tests one after another against a single `TestContext`.
//! Every entry point runs inside `catch_unwind`, so a panicking test is turned
//! into a diagnostic instead of tearing the run down.

use super::formatting::{failure_lines, pass_line, skip_line, unexpected_pass_lines, xfail_line};
use crate::planner::ExecutionPlan;
use std::any::{Any, TypeId};
use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Once;
use ulpcheck_core::{Descriptor, FailureKind, Signal, TestContext, render_type_name};
use ulpcheck_report::{Diagnostic, RunSummary};

/// Final state of one test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Counted as passed (including an expected failure that failed)
    Passed,
    /// Counted as failed
    Failed,
    /// The test skipped itself
    Skipped,
}

/// What left the test body besides a plain `Ok(())`
enum Escape {
    Clean,
    Reported,
    Error { type_id: TypeId, description: String },
}

thread_local! {
    static QUIET: Cell<bool> = const { Cell::new(false) };
}

static FILTER_HOOK: Once = Once::new();

/// Silences panic messages on the current thread while alive
///
/// The process-wide hook is wrapped once and consults a thread-local flag, so
/// runners on other threads are unaffected and the flag is restored even when
/// the run unwinds.
struct QuietPanics {
    previous: bool,
}

impl QuietPanics {
    fn enable() -> Self {
        FILTER_HOOK.call_once(|| {
            let hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                if !QUIET.with(Cell::get) {
                    hook(info);
                }
            }));
        });
        Self {
            previous: QUIET.with(|quiet| quiet.replace(true)),
        }
    }

    #[cfg(test)]
    fn active() -> bool {
        QUIET.with(Cell::get)
    }
}

impl Drop for QuietPanics {
    fn drop(&mut self) {
        QUIET.with(|quiet| quiet.set(self.previous));
    }
}

/// Sequential test runner
#[derive(Debug)]
pub struct Runner {
    ctx: TestContext,
    quiet_panics: bool,
}

impl Runner {
    /// Create a runner owning the run context
    pub fn new(ctx: TestContext) -> Self {
        Self {
            ctx,
            quiet_panics: false,
        }
    }

    /// Silence the panic hook while tests run
    pub fn quiet_panics(mut self, quiet: bool) -> Self {
        self.quiet_panics = quiet;
        self
    }

    /// The run context
    pub fn context(&self) -> &TestContext {
        &self.ctx
    }

    /// Run every planned test, then close the plot sink and print the summary
    pub fn run(&mut self, plan: &ExecutionPlan<'_>) -> RunSummary {
        let quiet = self.quiet_panics.then(QuietPanics::enable);

        let mut summary = RunSummary::default();
        for descriptor in &plan.descriptors {
            match self.run_one(descriptor) {
                Verdict::Passed => summary.passed += 1,
                Verdict::Failed => summary.failed += 1,
                Verdict::Skipped => summary.skipped += 1,
            }
            summary.passed += self.ctx.extra_passes();
        }

        drop(quiet);

        self.ctx.close_plot();
        self.ctx.write_line(&summary.to_string());
        self.ctx.flush();
        tracing::debug!(
            passed = summary.passed,
            failed = summary.failed,
            skipped = summary.skipped,
            "run finished"
        );
        summary
    }

    /// Run a single test and print its status line
    pub fn run_one(&mut self, descriptor: &Descriptor) -> Verdict {
        let name = descriptor.name();
        tracing::debug!("running {}", name);
        self.ctx.begin(name);

        let entry = descriptor.entry();
        let ctx = &mut self.ctx;
        let result = catch_unwind(AssertUnwindSafe(|| entry(ctx)));

        let escape = match result {
            Ok(Ok(())) => Escape::Clean,
            Ok(Err(Signal::Skipped(reason))) => {
                let line = skip_line(self.ctx.markers(), name, &reason);
                self.ctx.write_line(&line);
                tracing::debug!("{} skipped: {}", name, reason);
                return Verdict::Skipped;
            }
            Ok(Err(Signal::Failed)) => Escape::Reported,
            Ok(Err(Signal::Raised(error))) => Escape::Error {
                type_id: error.type_id(),
                description: format!("{}: {}", render_type_name(error.type_name()), error),
            },
            Err(payload) => Escape::Error {
                type_id: (*payload).type_id(),
                description: panic_message(&*payload),
            },
        };

        let failed = self.resolve(descriptor, escape);
        let verdict = self.reconcile(name, failed);
        tracing::debug!("{} -> {:?}", name, verdict);
        verdict
    }

    /// Whether the test failed, printing a diagnostic for escapes
    fn resolve(&mut self, descriptor: &Descriptor, escape: Escape) -> bool {
        match (descriptor.expected(), escape) {
            (_, Escape::Reported) => true,
            (Some(expected), Escape::Error { type_id, .. }) if expected.matches(type_id) => false,
            (Some(expected), Escape::Clean) => {
                let expected = render_type_name(expected.type_name());
                self.synthesize(descriptor, FailureKind::ExceptionNotThrown(expected));
                true
            }
            (Some(expected), Escape::Error { description, .. }) => {
                // Full path: a bare `Error` is ambiguous
                let kind = FailureKind::WrongException {
                    expected: expected.type_name().to_string(),
                    actual: description,
                };
                self.synthesize(descriptor, kind);
                true
            }
            (None, Escape::Error { description, .. }) => {
                self.synthesize(descriptor, FailureKind::UnexpectedException(description));
                true
            }
            (None, Escape::Clean) => false,
        }
    }

    fn synthesize(&mut self, descriptor: &Descriptor, kind: FailureKind) {
        let mut diagnostic = Diagnostic::new(descriptor.location());
        diagnostic.push(&kind.to_string());
        self.ctx.report(&diagnostic);
    }

    /// Apply expected-failure inversion and print the status line
    fn reconcile(&mut self, name: &str, failed: bool) -> Verdict {
        let markers = *self.ctx.markers();
        let stats = self.ctx.instrumentation().then(|| *self.ctx.distances());

        let (lines, verdict) = match (self.ctx.is_expecting_failure(), failed) {
            (true, true) => (vec![xfail_line(&markers, name)], Verdict::Passed),
            (true, false) => (unexpected_pass_lines(&markers, name), Verdict::Failed),
            (false, true) => (
                failure_lines(self.ctx.style(), &markers, name, stats.as_ref()),
                Verdict::Failed,
            ),
            (false, false) => (
                vec![pass_line(&markers, name, stats.as_ref())],
                Verdict::Passed,
            ),
        };
        for line in &lines {
            self.ctx.write_line(line);
        }
        verdict
    }
}

/// Extract a printable message from a panic payload
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown type".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::build_plan;
    use ulpcheck_compare::{Site, equal, fuzzy, verify};
    use ulpcheck_core::{Registry, TestResult, skip};
    use std::io::{self, Write};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use ulpcheck_report::{BufferConsole, Console, Location, OutputStyle, PlotSink};
    use ulpcheck_stats::FloatKind;

    #[derive(Debug)]
    struct Overflow;

    impl std::fmt::Display for Overflow {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("value out of range")
        }
    }

    impl std::error::Error for Overflow {}

    fn site(lhs: &'static str, rhs: &'static str) -> Site {
        Site::new("demo.rs", 7, lhs, rhs)
    }

    fn passes(ctx: &mut TestContext) -> TestResult {
        equal(site("1 + 1", "2"), &(1 + 1), &2).finish(ctx)
    }

    fn fails(ctx: &mut TestContext) -> TestResult {
        equal(site("1 + 1", "3"), &(1 + 1), &3).finish(ctx)
    }

    fn xfails(ctx: &mut TestContext) -> TestResult {
        ctx.expect_failure();
        verify(site("false", ""), false).finish(ctx)
    }

    fn xpasses(ctx: &mut TestContext) -> TestResult {
        ctx.expect_failure();
        verify(site("true", ""), true).finish(ctx)
    }

    fn skips(_: &mut TestContext) -> TestResult {
        skip("no AVX")
    }

    fn panics(_: &mut TestContext) -> TestResult {
        panic!("index out of bounds")
    }

    fn raises(_: &mut TestContext) -> TestResult {
        Err::<(), _>(Overflow)?;
        Ok(())
    }

    fn near_one(ctx: &mut TestContext) -> TestResult {
        let next = f32::from_bits(1.0f32.to_bits() + 1);
        fuzzy(ctx, site("next", "1.0"), &next, &1.0).finish(ctx)
    }

    fn extra_passes(ctx: &mut TestContext) -> TestResult {
        ctx.add_pass("mask 1");
        ctx.add_pass("mask 2");
        Ok(())
    }

    fn widens_tolerance(ctx: &mut TestContext) -> TestResult {
        ctx.set_fuzziness(FloatKind::Single, 8.0);
        Ok(())
    }

    fn sees_default_tolerance(ctx: &mut TestContext) -> TestResult {
        let tolerance = ctx.fuzziness(FloatKind::Single);
        verify(site("tolerance == 1", ""), tolerance == 1.0).finish(ctx)
    }

    fn runner() -> (Runner, BufferConsole) {
        let console = BufferConsole::new();
        let ctx = TestContext::new(Box::new(console.clone()));
        (Runner::new(ctx).quiet_panics(true), console)
    }

    fn run(registry: &Registry) -> (RunSummary, Vec<String>) {
        let (mut runner, console) = runner();
        let summary = runner.run(&build_plan(registry, None));
        (summary, console.lines())
    }

    #[test]
    fn test_pass_and_fail() {
        let mut registry = Registry::new();
        registry.register("passes", passes).register("fails", fails);

        let (summary, lines) = run(&registry);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.exit_code(), 1);
        assert_eq!(
            lines,
            vec![
                " PASS: passes",
                " FAIL: ┍ at demo.rs:7:",
                " FAIL: │ 1 + 1 (2) == 3 (3) -> false",
                " FAIL: ┕ fails",
                "Testing done. 1 tests passed. 1 tests failed. 0 tests skipped.",
            ]
        );
    }

    #[test]
    fn test_expected_failure_inversion() {
        let mut registry = Registry::new();
        registry.register("xfails", xfails).register("xpasses", xpasses);

        let (summary, lines) = run(&registry);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(lines[0], "XFAIL: ┍ at demo.rs:7: false");
        assert_eq!(lines[1], "XFAIL: xfails");
        assert_eq!(lines[2], "unexpected PASS: xpasses");
        assert_eq!(
            lines[3],
            " FAIL: This test should have failed but didn't. Check the code!"
        );
    }

    #[test]
    fn test_skip_counts_separately() {
        let mut registry = Registry::new();
        registry.register("skips", skips).register("passes", passes);

        let (summary, lines) = run(&registry);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.exit_code(), 0);
        assert_eq!(lines[0], " SKIP: skips (no AVX)");
    }

    #[test]
    fn test_panic_becomes_unexpected_exception() {
        let mut registry = Registry::new();
        registry.register("panics", panics).register("passes", passes);

        let (summary, lines) = run(&registry);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.passed, 1);
        assert_eq!(lines[0], " FAIL: ┍ unexpected error: index out of bounds");
        assert_eq!(lines[1], " FAIL: ┕ panics");
    }

    #[test]
    fn test_expected_error_type() {
        let mut registry = Registry::new();
        registry
            .register_raising::<Overflow>("raises", raises)
            .register_raising::<Overflow>("does not raise", passes)
            .register_raising::<std::fmt::Error>("raises other", raises)
            .register("raises unexpectedly", raises);

        let (summary, lines) = run(&registry);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 3);
        assert_eq!(lines[0], " PASS: raises");
        assert_eq!(
            lines[1],
            " FAIL: ┍ expected Overflow to be raised, but nothing was"
        );
        assert_eq!(lines[2], " FAIL: ┕ does not raise");
        assert!(lines[3].starts_with(" FAIL: ┍ expected "), "{}", lines[3]);
        assert!(
            lines[3].ends_with("fmt::Error to be raised, but got: Overflow: value out of range"),
            "{}",
            lines[3]
        );
        assert_eq!(lines[4], " FAIL: ┕ raises other");
        assert_eq!(
            lines[5],
            " FAIL: ┍ unexpected error: Overflow: value out of range"
        );
    }

    #[test]
    fn test_wrong_panic_payload_names_expected_type() {
        fn panics_with_text(_: &mut TestContext) -> TestResult {
            panic!("lane 3 overflowed")
        }

        let mut registry = Registry::new();
        registry.register_raising::<Overflow>("payload", panics_with_text);
        let (summary, lines) = run(&registry);
        assert_eq!(summary.failed, 1);
        assert!(lines[0].contains("Overflow to be raised, but got: lane 3 overflowed"));
    }

    #[test]
    fn test_expected_panic_payload_type() {
        fn panics_with_overflow(_: &mut TestContext) -> TestResult {
            std::panic::panic_any(Overflow)
        }

        let mut registry = Registry::new();
        registry.register_raising::<Overflow>("payload", panics_with_overflow);
        let (summary, _) = run(&registry);
        assert_eq!(summary.passed, 1);
    }

    #[test]
    fn test_synthesized_diagnostic_uses_location() {
        let mut registry = Registry::new();
        registry.push(Descriptor::new("panics", panics).at(Location::new("t.rs", 12)));

        let (_, lines) = run(&registry);
        assert_eq!(
            lines[0],
            " FAIL: ┍ at t.rs:12: unexpected error: index out of bounds"
        );
    }

    #[test]
    fn test_instrumentation_lines() {
        let console = BufferConsole::new();
        let ctx = TestContext::new(Box::new(console.clone())).with_instrumentation(true);
        let mut runner = Runner::new(ctx);

        let mut registry = Registry::new();
        registry.register("near", near_one).register("exact", passes);
        runner.run(&build_plan(&registry, None));

        let lines = console.lines();
        assert_eq!(
            lines[0],
            " PASS: near with a maximal distance of 1 to the reference (mean: 1)."
        );
        assert_eq!(
            lines[1],
            " PASS: exact all values matched the reference precisely."
        );
    }

    #[test]
    fn test_single_line_failure() {
        let console = BufferConsole::new();
        let ctx = TestContext::new(Box::new(console.clone())).with_style(OutputStyle::SingleLine);
        let mut runner = Runner::new(ctx);

        let mut registry = Registry::new();
        registry.register("fails", fails);
        runner.run(&build_plan(&registry, None));

        let lines = console.lines();
        assert_eq!(lines[0], "demo.rs:7: error: 1 + 1 (2) == 3 (3) -> false");
        assert_eq!(lines[1], " FAIL: fails");
    }

    #[test]
    fn test_extra_passes_counted() {
        let mut registry = Registry::new();
        registry.register("extra", extra_passes);

        let (summary, lines) = run(&registry);
        assert_eq!(summary.passed, 3);
        assert_eq!(lines[0], " PASS: mask 1");
        assert_eq!(lines[2], " PASS: extra");
    }

    #[test]
    fn test_state_reset_between_tests() {
        let mut registry = Registry::new();
        registry
            .register("widen", widens_tolerance)
            .register("default", sees_default_tolerance);

        let (summary, _) = run(&registry);
        assert_eq!(summary.passed, 2);
    }

    struct ExplodingConsole;

    impl Console for ExplodingConsole {
        fn write_line(&mut self, _line: &str) {
            panic!("console closed");
        }
    }

    #[test]
    fn test_quiet_panics_scoped_to_run() {
        let mut registry = Registry::new();
        registry.register("panics", panics);

        let (summary, _) = run(&registry);
        assert_eq!(summary.failed, 1);
        assert!(!QuietPanics::active());

        let ctx = TestContext::new(Box::new(ExplodingConsole));
        let mut runner = Runner::new(ctx).quiet_panics(true);
        let plan = build_plan(&registry, None);
        let unwound = catch_unwind(AssertUnwindSafe(|| runner.run(&plan)));
        assert!(unwound.is_err());
        assert!(!QuietPanics::active());
    }

    #[test]
    fn test_quiet_panics_nests() {
        let outer = QuietPanics::enable();
        {
            let _inner = QuietPanics::enable();
            assert!(QuietPanics::active());
        }
        assert!(QuietPanics::active());
        drop(outer);
        assert!(!QuietPanics::active());
    }

    /// Accepts writes until `broken` is set
    struct FlakyWriter {
        broken: Arc<AtomicBool>,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.broken.load(Ordering::SeqCst) {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
            } else {
                Ok(buf.len())
            }
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_plot_write_failure_is_only_logged() {
        let broken = Arc::new(AtomicBool::new(false));
        let sink = PlotSink::new(FlakyWriter {
            broken: broken.clone(),
        })
        .unwrap();
        broken.store(true, Ordering::SeqCst);

        let console = BufferConsole::new();
        let ctx = TestContext::new(Box::new(console.clone())).with_plot(sink);
        let mut runner = Runner::new(ctx);

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let verdict = tracing::subscriber::with_default(subscriber, || {
            runner.run_one(&Descriptor::new("near", near_one))
        });

        assert_eq!(verdict, Verdict::Passed);
        assert_eq!(console.lines(), vec![" PASS: near"]);
        let logs = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("WARN"), "{}", logs);
        assert!(logs.contains("Cannot write plot data: pipe closed"), "{}", logs);
    }

    #[test]
    fn test_panic_message_payloads() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42u8), "unknown type");
    }
}
