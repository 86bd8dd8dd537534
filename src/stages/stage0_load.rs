use std::path::Path;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::ReportError;
use crate::io::read_record;
use crate::models::{LoadedRecord, Stage};

/// Stage 0: read the record the upstream harness left at `path`.
///
/// An absent or empty file stops the run here.
pub fn load_record(path: &Path, sink: &dyn DiagnosticSink) -> Result<LoadedRecord, ReportError> {
    sink.emit(
        Diagnostic::debug("Loading Cucumber JSON record")
            .at(Stage::Load)
            .with_path(path),
    );

    let record = read_record(path)?;

    sink.emit(
        Diagnostic::debug(format!("Read {} bytes of record text", record.text.len()))
            .at(Stage::Load)
            .with_path(path),
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CapturingSink, Severity};

    #[test]
    fn test_load_record_logs_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cucumber.json");
        std::fs::write(&path, "[]").unwrap();

        let sink = CapturingSink::new();
        let record = load_record(&path, &sink).unwrap();

        assert_eq!(record.text, "[]");
        assert!(sink.contains(Severity::Debug, "Read 2 bytes"));
    }

    #[test]
    fn test_load_record_missing() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CapturingSink::new();

        let err = load_record(&dir.path().join("gone.json"), &sink).unwrap_err();
        assert_eq!(err.stage(), Stage::Load);
    }
}
