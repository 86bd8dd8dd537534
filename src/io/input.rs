use std::path::Path;

use crate::error::ReportError;
use crate::models::{LoadedRecord, RecordHandle};

/// Read a Cucumber JSON record into memory.
///
/// Fails with `InputMissing` when the file is absent, empty, or can't be
/// read as UTF-8 text.
pub fn read_record(path: &Path) -> Result<LoadedRecord, ReportError> {
    let handle = RecordHandle::inspect(path);
    if let Some(reason) = handle.unusable_reason() {
        return Err(ReportError::InputMissing {
            path: handle.path,
            reason: reason.to_string(),
        });
    }

    let text = std::fs::read_to_string(path).map_err(|e| ReportError::InputMissing {
        path: path.to_path_buf(),
        reason: format!("failed to read file: {}", e),
    })?;

    Ok(LoadedRecord {
        path: handle.path,
        text,
    })
}
