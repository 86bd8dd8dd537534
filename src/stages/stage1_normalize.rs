use serde::Deserialize;
use serde::de::Error as _;
use serde_json::Value;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::ReportError;
use crate::models::{CanonicalRecord, LoadedRecord, Stage};

/// Deepest array/object nesting a record may have
pub const MAX_NESTING_DEPTH: usize = 1000;

/// Parse record text and re-serialize it in canonical form.
///
/// Key order, array order and numeric literals come through unchanged; only
/// insignificant whitespace (and a leading byte-order mark) is dropped.
/// Canonical text maps to itself.
pub fn canonicalize(text: &str) -> Result<CanonicalRecord, serde_json::Error> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let depth = nesting_depth(text);
    if depth > MAX_NESTING_DEPTH {
        return Err(serde_json::Error::custom(format!(
            "nesting depth {} exceeds the limit of {}",
            depth, MAX_NESTING_DEPTH
        )));
    }

    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;

    Ok(CanonicalRecord::from_value(&value))
}

/// Deepest bracket nesting outside string literals
fn nesting_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in text.bytes() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    deepest
}

/// Stage 1: validate the record and reduce it to canonical JSON
pub fn normalize_record(
    record: &LoadedRecord,
    sink: &dyn DiagnosticSink,
) -> Result<CanonicalRecord, ReportError> {
    let canonical = canonicalize(&record.text).map_err(|source| ReportError::InputInvalid {
        path: record.path.clone(),
        source,
    })?;

    let shape = match canonical.feature_count() {
        Some(count) => format!("{} features", count),
        None => "non-array document".to_string(),
    };
    sink.emit(
        Diagnostic::debug(format!(
            "Normalized record: {} bytes -> {} bytes ({})",
            record.text.len(),
            canonical.len(),
            shape
        ))
        .at(Stage::Normalize)
        .with_path(&record.path),
    );

    Ok(canonical)
}
