//! End-of-run hook for a test harness.
//!
//! A session owns the location the harness writes its Cucumber JSON to and
//! the directory the report goes to. Calling [`ReportSession::finish`] once
//! the run is over produces the report.

use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::diagnostics::DiagnosticSink;
use crate::io::AssetProvider;
use crate::pipeline::{ReportGenerator, ReportOutcome};

/// Output directory used when the harness doesn't name one
pub const DEFAULT_OUTPUT_DIR: &str = "target/cucumber";

#[derive(Debug)]
enum RecordFile {
    /// Scratch file removed when the session is dropped
    Temporary(NamedTempFile),
    /// Caller-owned path, left alone
    Provided(PathBuf),
}

impl RecordFile {
    fn path(&self) -> &Path {
        match self {
            RecordFile::Temporary(file) => file.path(),
            RecordFile::Provided(path) => path,
        }
    }
}

#[derive(Debug)]
pub struct ReportSession<A = crate::io::BundledAssets, S = crate::diagnostics::TracingSink> {
    output_dir: PathBuf,
    record: RecordFile,
    generator: ReportGenerator<A, S>,
}

impl ReportSession {
    /// Session with a fresh `cucumber*.json` scratch record
    pub fn new(output_dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let record = tempfile::Builder::new()
            .prefix("cucumber")
            .suffix(".json")
            .tempfile()?;

        Ok(Self {
            output_dir: output_dir.into(),
            record: RecordFile::Temporary(record),
            generator: ReportGenerator::default(),
        })
    }

    /// Session writing to [`DEFAULT_OUTPUT_DIR`]
    pub fn in_default_location() -> std::io::Result<Self> {
        Self::new(DEFAULT_OUTPUT_DIR)
    }

    /// Session reading a record the caller manages
    pub fn with_record(output_dir: impl Into<PathBuf>, record_path: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            record: RecordFile::Provided(record_path.into()),
            generator: ReportGenerator::default(),
        }
    }
}

impl<A: AssetProvider, S: DiagnosticSink> ReportSession<A, S> {
    /// Swap in a generator with different assets or log sink
    pub fn using<B: AssetProvider, T: DiagnosticSink>(
        self,
        generator: ReportGenerator<B, T>,
    ) -> ReportSession<B, T> {
        ReportSession {
            output_dir: self.output_dir,
            record: self.record,
            generator,
        }
    }

    /// Where the harness should write its Cucumber JSON
    pub fn record_path(&self) -> &Path {
        self.record.path()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Test run finished: generate the report from whatever the harness wrote
    pub fn finish(&self) -> ReportOutcome {
        self.generator.generate(self.record_path(), &self.output_dir)
    }
}
