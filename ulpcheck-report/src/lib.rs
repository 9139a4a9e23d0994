#![warn(missing_docs)]
//! ulpcheck Report - Console and Data Output
//!
//! Everything a test run writes goes through this crate:
//! - `Console`: a line-oriented sink (stdout, or an in-memory buffer)
//! - `Diagnostic`: the text of one failed comparison, rendered in the boxed
//!   or the single-line editor-locatable style
//! - `PlotSink`: the two-column `reference<TAB>distance` data file
//! - `RunSummary`: the final tally line

mod console;
mod diagnostic;
mod plot;
mod style;
mod summary;

pub use console::{BufferConsole, Console, StdoutConsole};
pub use diagnostic::{Diagnostic, Location};
pub use plot::{PLOT_HEADER, PlotError, PlotSink};
pub use style::{Markers, OutputStyle};
pub use summary::RunSummary;
