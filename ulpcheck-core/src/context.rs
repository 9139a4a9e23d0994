//! Run Context
//!
//! One `TestContext` lives for the whole run and is handed to every test body
//! by `&mut`. Part of it is per-test state that the runner resets before each
//! descriptor; the rest (style, instrumentation, plot sink, console) is fixed
//! for the run.

use std::fmt::Display;
use ulpcheck_report::{Console, Diagnostic, Markers, OutputStyle, PlotSink, StdoutConsole};
use ulpcheck_stats::{DEFAULT_TOLERANCE, DistanceStats, Float, FloatKind};

/// Mutable state shared by the runner and the comparison engine
pub struct TestContext {
    // Per test
    expect_failure: bool,
    tolerance: [f64; FloatKind::ALL.len()],
    distances: DistanceStats,
    extra_passes: usize,

    // Per run
    current: String,
    style: OutputStyle,
    markers: Markers,
    instrumentation: bool,
    plot: Option<PlotSink>,
    console: Box<dyn Console>,
}

impl std::fmt::Debug for TestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestContext")
            .field("current", &self.current)
            .field("expect_failure", &self.expect_failure)
            .field("tolerance", &self.tolerance)
            .field("distances", &self.distances)
            .field("style", &self.style)
            .field("instrumentation", &self.instrumentation)
            .field("plot", &self.plot)
            .finish_non_exhaustive()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new(Box::new(StdoutConsole))
    }
}

impl TestContext {
    /// Context writing to `console`, boxed style, no colour, no instrumentation
    pub fn new(console: Box<dyn Console>) -> Self {
        Self {
            expect_failure: false,
            tolerance: [DEFAULT_TOLERANCE; FloatKind::ALL.len()],
            distances: DistanceStats::new(),
            extra_passes: 0,
            current: String::new(),
            style: OutputStyle::default(),
            markers: Markers::new(false),
            instrumentation: false,
            plot: None,
            console,
        }
    }

    /// Set the diagnostic layout
    pub fn with_style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable or disable ANSI colours
    pub fn with_color(mut self, color: bool) -> Self {
        self.markers = Markers::new(color);
        self
    }

    /// Track maximal and mean distance per test
    pub fn with_instrumentation(mut self, enabled: bool) -> Self {
        self.instrumentation = enabled;
        self
    }

    /// Append fuzzy comparison data to `sink`
    pub fn with_plot(mut self, sink: PlotSink) -> Self {
        self.plot = Some(sink);
        self
    }

    // ----- runner side -----

    /// Enter a new test: reset per-test state and remember its name
    pub fn begin(&mut self, name: &str) {
        self.reset();
        self.current.clear();
        self.current.push_str(name);
    }

    /// Restore per-test defaults
    pub fn reset(&mut self) {
        self.expect_failure = false;
        self.tolerance = [DEFAULT_TOLERANCE; FloatKind::ALL.len()];
        self.distances.reset();
        self.extra_passes = 0;
    }

    /// Name of the test currently running
    pub fn current_test(&self) -> &str {
        &self.current
    }

    /// Passes recorded with [`add_pass`](Self::add_pass) in the current test
    pub fn extra_passes(&self) -> usize {
        self.extra_passes
    }

    /// Distances folded in by fuzzy comparisons of the current test
    pub fn distances(&self) -> &DistanceStats {
        &self.distances
    }

    /// Whether distance instrumentation is on
    pub fn instrumentation(&self) -> bool {
        self.instrumentation
    }

    /// Diagnostic layout in use
    pub fn style(&self) -> OutputStyle {
        self.style
    }

    /// Status markers in use
    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Flush and close the plot sink, if one is open
    pub fn close_plot(&mut self) {
        if let Some(mut sink) = self.plot.take() {
            if let Err(e) = sink.flush() {
                tracing::warn!("{}", e);
            }
            tracing::debug!("plot sink closed after {} rows", sink.rows());
        }
    }

    /// Emit one line on the console
    pub fn write_line(&mut self, line: &str) {
        self.console.write_line(line);
    }

    /// Flush the console
    pub fn flush(&mut self) {
        self.console.flush();
    }

    // ----- test side -----

    /// Declare that the current test is supposed to fail
    pub fn expect_failure(&mut self) {
        self.expect_failure = true;
    }

    /// Whether the current test declared an expected failure
    pub fn is_expecting_failure(&self) -> bool {
        self.expect_failure
    }

    /// Allowed ULP distance for fuzzy comparisons of `kind` in this test
    pub fn set_fuzziness(&mut self, kind: FloatKind, ulps: f64) {
        self.tolerance[kind.index()] = ulps;
    }

    /// [`set_fuzziness`](Self::set_fuzziness) keyed by a float type
    pub fn set_fuzziness_for<T: Float>(&mut self, ulps: f64) {
        self.set_fuzziness(T::KIND, ulps);
    }

    /// Current tolerance for `kind`
    pub fn fuzziness(&self, kind: FloatKind) -> f64 {
        self.tolerance[kind.index()]
    }

    /// Count an additional passed check and print it
    pub fn add_pass(&mut self, what: impl Display) {
        self.extra_passes += 1;
        let line = format!("{}{}", self.markers.pass(), what);
        self.console.write_line(&line);
    }

    // ----- comparison side -----

    /// Fold one fuzzy lane into instrumentation and the plot sink
    pub fn record_fuzzy<T: Float>(&mut self, reference: T, signed_distance: T) {
        if self.instrumentation {
            self.distances.record(signed_distance.to_f64());
        }
        if let Some(sink) = self.plot.as_mut() {
            if let Err(e) = sink.record(reference, signed_distance) {
                tracing::warn!("{}", e);
            }
        }
    }

    /// Print a failure diagnostic in the configured style
    pub fn report(&mut self, diagnostic: &Diagnostic) {
        let lines = diagnostic.render(self.style, &self.markers, self.expect_failure);
        self.console.write_lines(&lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ulpcheck_report::{BufferConsole, Location};

    fn buffered() -> (TestContext, BufferConsole) {
        let console = BufferConsole::new();
        (TestContext::new(Box::new(console.clone())), console)
    }

    #[test]
    fn test_begin_resets_per_test_state() {
        let (mut ctx, _) = buffered();
        ctx = ctx.with_instrumentation(true);
        ctx.begin("first");
        ctx.expect_failure();
        ctx.set_fuzziness(FloatKind::Single, 4.0);
        ctx.record_fuzzy(1.0f32, 3.0);
        ctx.add_pass("extra");

        ctx.begin("second");
        assert_eq!(ctx.current_test(), "second");
        assert!(!ctx.is_expecting_failure());
        assert_eq!(ctx.fuzziness(FloatKind::Single), 1.0);
        assert_eq!(ctx.fuzziness(FloatKind::Double), 1.0);
        assert_eq!(ctx.distances().count(), 0);
        assert_eq!(ctx.extra_passes(), 0);
    }

    #[test]
    fn test_fuzziness_per_kind() {
        let (mut ctx, _) = buffered();
        ctx.set_fuzziness_for::<f64>(2.5);
        assert_eq!(ctx.fuzziness(FloatKind::Double), 2.5);
        assert_eq!(ctx.fuzziness(FloatKind::Single), 1.0);
    }

    #[test]
    fn test_record_without_instrumentation_is_ignored() {
        let (mut ctx, _) = buffered();
        ctx.record_fuzzy(1.0f64, 5.0);
        assert_eq!(ctx.distances().count(), 0);
    }

    #[test]
    fn test_record_with_plot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.dat");
        let (ctx, _) = buffered();
        let mut ctx = ctx
            .with_instrumentation(true)
            .with_plot(PlotSink::create(&path).unwrap());

        ctx.record_fuzzy(2.0f32, -1.5);
        ctx.record_fuzzy(4.0f32, 0.5);
        assert_eq!(ctx.distances().max(), 1.5);
        assert_eq!(ctx.distances().mean(), Some(1.0));

        ctx.close_plot();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "# reference\tdistance\n2\t-1.5\n4\t0.5\n");
    }

    #[test]
    fn test_report_uses_expect_failure_marker() {
        let (mut ctx, console) = buffered();
        let mut d = Diagnostic::new(Some(Location::new("x.rs", 3)));
        d.push("boom");

        ctx.report(&d);
        ctx.expect_failure();
        ctx.report(&d);

        assert_eq!(
            console.lines(),
            vec![" FAIL: ┍ at x.rs:3: boom", "XFAIL: ┍ at x.rs:3: boom"]
        );
    }

    #[test]
    fn test_add_pass_prints() {
        let (mut ctx, console) = buffered();
        ctx.add_pass("mask 3 of 8");
        assert_eq!(ctx.extra_passes(), 1);
        assert_eq!(console.lines(), vec![" PASS: mask 3 of 8"]);
    }
}
