//! Comparison Outcome

use std::fmt::{Debug, Display};
use ulpcheck_core::{Signal, TestContext, TestResult};
use ulpcheck_report::{Diagnostic, Location};

/// Where a check was written and the source text of its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    /// Source position
    pub location: Location,
    /// Source text of the first operand (or the condition)
    pub lhs: &'static str,
    /// Source text of the second operand, empty for single-operand checks
    pub rhs: &'static str,
}

impl Site {
    /// Build a site; normally produced by the assertion macros
    pub const fn new(file: &'static str, line: u32, lhs: &'static str, rhs: &'static str) -> Self {
        Self {
            location: Location::new(file, line),
            lhs,
            rhs,
        }
    }

    pub(crate) fn diagnostic(&self) -> Diagnostic {
        Diagnostic::new(Some(self.location))
    }

    /// `lhs (a) op rhs (b)`
    pub(crate) fn operands<A: Debug + ?Sized, B: Debug + ?Sized>(&self, a: &A, op: &str, b: &B) -> String {
        format!("{} ({:?}) {} {} ({:?})", self.lhs, a, op, self.rhs, b)
    }
}

/// Result of one check, to be finished against the run context
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "call `.finish(ctx)?` so a failed check ends the test"]
pub struct Outcome {
    failure: Option<Diagnostic>,
}

impl Outcome {
    /// A check that held
    pub fn pass() -> Self {
        Self { failure: None }
    }

    /// A check that did not hold, with its diagnostic
    pub fn failure(diagnostic: Diagnostic) -> Self {
        Self {
            failure: Some(diagnostic),
        }
    }

    /// Whether the check held
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }

    /// Diagnostic of a failed check
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.failure.as_ref()
    }

    /// Attach caller context on a new line; `f` only runs if the check failed
    pub fn note<D: Display>(mut self, f: impl FnOnce() -> D) -> Self {
        if let Some(d) = self.failure.as_mut() {
            d.line(&f().to_string());
        }
        self
    }

    /// Print the diagnostic of a failed check and abort the test
    pub fn finish(self, ctx: &mut TestContext) -> TestResult {
        match self.failure {
            None => Ok(()),
            Some(diagnostic) => {
                ctx.report(&diagnostic);
                Err(Signal::Failed)
            }
        }
    }
}
