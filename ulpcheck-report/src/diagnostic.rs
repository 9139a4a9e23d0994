//! Failure Diagnostics
//!
//! A diagnostic is accumulated as free text: embedded newlines start a new
//! continuation line, which the chosen style then prefixes. The first line is
//! the headline that follows the `at file:line:` location.

use crate::{Markers, OutputStyle};
use std::fmt;

/// Source position of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// Source file as reported by `file!()`
    pub file: &'static str,
    /// 1-based line number
    pub line: u32,
}

impl Location {
    /// Create a location
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Text of one failed check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    location: Option<Location>,
    lines: Vec<String>,
}

impl Diagnostic {
    /// Empty diagnostic anchored at `location`
    pub fn new(location: Option<Location>) -> Self {
        Self {
            location,
            lines: vec![String::new()],
        }
    }

    /// Where the failing check sits, if known
    pub fn location(&self) -> Option<Location> {
        self.location
    }

    /// Append text; every `\n` opens a continuation line
    pub fn push(&mut self, text: &str) -> &mut Self {
        let mut parts = text.split('\n');
        if let (Some(first), Some(last)) = (parts.next(), self.lines.last_mut()) {
            last.push_str(first);
        }
        for part in parts {
            self.lines.push(part.to_string());
        }
        self
    }

    /// Start a new continuation line holding `text`
    pub fn line(&mut self, text: &str) -> &mut Self {
        self.lines.push(String::new());
        self.push(text)
    }

    /// Headline followed by the continuation lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lay the diagnostic out in `style`
    pub fn render(&self, style: OutputStyle, markers: &Markers, expect_failure: bool) -> Vec<String> {
        let mut lines: Vec<&str> = self.lines.iter().map(String::as_str).collect();
        // A trailing newline must not produce an empty continuation line
        while lines.len() > 1 && lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        match style {
            OutputStyle::Boxed => self.render_boxed(&lines, markers, expect_failure),
            OutputStyle::SingleLine => self.render_single_line(&lines, markers, expect_failure),
        }
    }

    fn render_boxed(&self, lines: &[&str], markers: &Markers, expect_failure: bool) -> Vec<String> {
        let marker = markers.fail(expect_failure);
        let headline = lines.first().copied().unwrap_or_default();

        let mut header = format!("{}┍ ", marker);
        if let Some(loc) = self.location {
            header.push_str(&format!("at {}:", loc));
            if !headline.is_empty() {
                header.push(' ');
            }
        }
        header.push_str(headline);

        let mut out = vec![header];
        out.extend(lines.iter().skip(1).map(|l| format!("{}│ {}", marker, l)));
        out
    }

    fn render_single_line(
        &self,
        lines: &[&str],
        markers: &Markers,
        expect_failure: bool,
    ) -> Vec<String> {
        let prefix = self
            .location
            .map(|loc| format!("{}: ", loc))
            .unwrap_or_default();

        // An empty headline pulls the first continuation line up
        let mut rest = lines.iter().copied();
        let mut headline = rest.next().unwrap_or_default();
        if headline.is_empty() {
            headline = rest.next().unwrap_or_default();
        }

        let mut out = vec![format!(
            "{}{}{}",
            prefix,
            markers.severity(expect_failure),
            headline
        )];
        let note = markers.note();
        out.extend(rest.map(|l| format!("{}{}{}", prefix, note, l)));
        out
    }
}
