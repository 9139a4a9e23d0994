//! Output Styles and Markers
//!
//! Two ways to render a failure: a box-drawn block that reads well in a
//! terminal, and a `file:line: error:` form that editors can jump to.

use colored::Colorize;
use serde::{Deserialize, Serialize};

/// How failure diagnostics are laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputStyle {
    /// `┍`/`│`/`┕` box around the diagnostic
    #[default]
    Boxed,
    /// One `file:line: error:` / `file:line: note:` line per diagnostic line
    SingleLine,
}

impl OutputStyle {
    /// Line that closes a failed test's diagnostics and names the test
    pub fn closing_line(self, markers: &Markers, expect_failure: bool, name: &str) -> String {
        match self {
            OutputStyle::Boxed => format!("{}┕ {}", markers.fail(expect_failure), name),
            OutputStyle::SingleLine => format!("{}{}", markers.fail(expect_failure), name),
        }
    }
}

/// Status markers, optionally coloured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Markers {
    color: bool,
}

impl Markers {
    /// Plain or ANSI-coloured markers
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Whether ANSI colour codes are emitted
    pub fn color(&self) -> bool {
        self.color
    }

    /// `" FAIL: "`, or `"XFAIL: "` while a failure is expected
    pub fn fail(&self, expect_failure: bool) -> String {
        if expect_failure {
            self.paint("XFAIL", "", |s| s.yellow().bold().to_string())
        } else {
            self.paint("FAIL", " ", |s| s.red().bold().to_string())
        }
    }

    /// `" PASS: "`
    pub fn pass(&self) -> String {
        self.paint("PASS", " ", |s| s.green().bold().to_string())
    }

    /// `"unexpected PASS: "`, for a test that should have failed
    pub fn unexpected_pass(&self) -> String {
        self.paint("unexpected PASS", "", |s| s.red().bold().to_string())
    }

    /// `" SKIP: "`
    pub fn skip(&self) -> String {
        self.paint("SKIP", " ", |s| s.cyan().to_string())
    }

    /// Severity word used by the single-line style
    pub fn severity(&self, expect_failure: bool) -> String {
        if expect_failure {
            self.paint("xfail", "", |s| s.yellow().to_string())
        } else {
            self.paint("error", "", |s| s.red().bold().to_string())
        }
    }

    /// Continuation severity used by the single-line style
    pub fn note(&self) -> String {
        self.paint("note", "", |s| s.cyan().to_string())
    }

    fn paint(&self, word: &str, pad: &str, style: impl Fn(&str) -> String) -> String {
        if self.color {
            format!("{}{}: ", pad, style(word))
        } else {
            format!("{}{}: ", pad, word)
        }
    }
}
