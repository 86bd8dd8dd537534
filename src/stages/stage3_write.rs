use std::path::{Path, PathBuf};

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::ReportError;
use crate::io::{ensure_directory, write_artifact};
use crate::models::{OutputArtifact, Stage};

/// Stage 3: persist the merged report.
///
/// Creates the output directory chain when needed, then overwrites
/// `cucumber-pretty-report.html` inside it. Returns the absolute path of the
/// written report.
pub fn write_report(
    merged: String,
    output_dir: &Path,
    sink: &dyn DiagnosticSink,
) -> Result<PathBuf, ReportError> {
    if !output_dir.is_dir() {
        sink.emit(
            Diagnostic::debug("Creating output directory")
                .at(Stage::Write)
                .with_path(output_dir),
        );
    }
    ensure_directory(output_dir)?;

    let artifact = OutputArtifact::new(output_dir, merged);
    let written = write_artifact(&artifact)?;

    sink.emit(
        Diagnostic::debug(format!("Wrote {} bytes", artifact.contents.len()))
            .at(Stage::Write)
            .with_path(&written),
    );
    Ok(written)
}
