//! Test Executor
//!
//! Runs planned tests and tallies their verdicts.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Descriptor (registered or discovered via #[unittest])
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Reset state, run entry, resolve escapes
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Status lines and distance summaries
//! └─────────────┘
//! ```

mod execution;
mod formatting;

pub use execution::{Runner, Verdict};
pub use formatting::{distance_summary, pass_line};
