//! Distance Plot Output
//!
//! Two tab-separated columns, reference and signed ULP distance, one row per
//! fuzzily compared lane. The file is meant for gnuplot and friends.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Header row written when the sink is opened
pub const PLOT_HEADER: &str = "# reference\tdistance";

/// Errors while writing plot data
#[derive(Debug, Error)]
pub enum PlotError {
    /// The output file could not be created
    #[error("Cannot create plot file {path}: {source}")]
    Create {
        /// Requested path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing a row failed
    #[error("Cannot write plot data: {0}")]
    Write(#[from] io::Error),
}

/// Destination for `(reference, signed distance)` rows
pub struct PlotSink {
    writer: Box<dyn Write + Send>,
    rows: u64,
}

impl std::fmt::Debug for PlotSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotSink").field("rows", &self.rows).finish()
    }
}

impl PlotSink {
    /// Create (truncate) `path` and write the header
    pub fn create(path: impl AsRef<Path>) -> Result<Self, PlotError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| PlotError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(BufWriter::new(file))
    }

    /// Wrap an arbitrary writer and write the header
    pub fn new(writer: impl Write + Send + 'static) -> Result<Self, PlotError> {
        let mut sink = Self {
            writer: Box::new(writer),
            rows: 0,
        };
        writeln!(sink.writer, "{}", PLOT_HEADER)?;
        Ok(sink)
    }

    /// Append one row
    pub fn record(&mut self, reference: impl Display, distance: impl Display) -> Result<(), PlotError> {
        writeln!(self.writer, "{}\t{}", reference, distance)?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far (header excluded)
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush buffered rows
    pub fn flush(&mut self) -> Result<(), PlotError> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for PlotSink {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!("failed to flush plot data: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dist.dat");

        let mut sink = PlotSink::create(&path).unwrap();
        sink.record(1.5f32, -2.0f32).unwrap();
        sink.record(0.25f64, 0.5f64).unwrap();
        assert_eq!(sink.rows(), 2);
        drop(sink);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "# reference\tdistance\n1.5\t-2\n0.25\t0.5\n");
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("dist.dat");

        let err = PlotSink::create(&path).unwrap_err();
        assert!(matches!(err, PlotError::Create { .. }));
        assert!(err.to_string().contains("dist.dat"));
    }
}
