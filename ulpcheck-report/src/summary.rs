//! Run Summary

use std::fmt;

/// Final tally of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Tests that passed, including expected failures that failed
    pub passed: usize,
    /// Tests that failed, including expected failures that passed
    pub failed: usize,
    /// Tests that skipped themselves
    pub skipped: usize,
}

impl RunSummary {
    /// Tests that ran to a verdict
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    /// Process exit status: the failure count, saturated to fit a byte
    pub fn exit_code(&self) -> i32 {
        self.failed.min(255) as i32
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Testing done. {} tests passed. {} tests failed. {} tests skipped.",
            self.passed, self.failed, self.skipped
        )
    }
}
