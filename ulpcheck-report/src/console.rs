//! Console Sinks
//!
//! The runner and the comparison engine only ever emit whole lines. A write
//! failure is logged and swallowed: losing a diagnostic must never turn into a
//! test failure of its own.

use std::io::Write;
use std::sync::{Arc, Mutex};

/// Line-oriented output sink
pub trait Console {
    /// Emit one line (without trailing newline)
    fn write_line(&mut self, line: &str);

    /// Emit several lines in order
    fn write_lines(&mut self, lines: &[String]) {
        for line in lines {
            self.write_line(line);
        }
    }

    /// Flush buffered output, if any
    fn flush(&mut self) {}
}

/// Console writing to the process's standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn write_line(&mut self, line: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{}", line) {
            tracing::warn!("failed to write to stdout: {}", e);
        }
    }

    fn flush(&mut self) {
        if let Err(e) = std::io::stdout().flush() {
            tracing::warn!("failed to flush stdout: {}", e);
        }
    }
}

/// In-memory console; clones share the same buffer
#[derive(Debug, Default, Clone)]
pub struct BufferConsole {
    lines: Arc<Mutex<Vec<String>>>,
}

impl BufferConsole {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Everything written so far, newline-joined
    pub fn contents(&self) -> String {
        self.lines().join("\n")
    }

    /// Discard the buffered lines
    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl Console for BufferConsole {
    fn write_line(&mut self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.to_string());
    }
}
