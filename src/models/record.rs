use std::path::{Path, PathBuf};

use serde_json::Value;

/// What the pipeline knows about the record file before reading it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHandle {
    /// Location the upstream harness wrote the record to
    pub path: PathBuf,
    /// Whether a regular file exists at `path`
    pub exists: bool,
    /// Size in bytes (0 when absent)
    pub len: u64,
}

impl RecordHandle {
    /// Stat the record file. Directories and dangling links count as absent.
    pub fn inspect(path: &Path) -> Self {
        let (exists, len) = match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => (true, meta.len()),
            _ => (false, 0),
        };

        Self {
            path: path.to_path_buf(),
            exists,
            len,
        }
    }

    /// A record is usable when it exists and has content
    pub fn is_usable(&self) -> bool {
        self.exists && self.len > 0
    }

    /// Why the record can't be used, if it can't
    pub fn unusable_reason(&self) -> Option<&'static str> {
        if !self.exists {
            Some("file does not exist")
        } else if self.len == 0 {
            Some("file is empty")
        } else {
            None
        }
    }
}

/// Raw record text as read from disk
#[derive(Debug, Clone)]
pub struct LoadedRecord {
    pub path: PathBuf,
    pub text: String,
}

/// Compact, script-safe JSON text for a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRecord {
    text: String,
    /// Number of top-level entries when the document is an array of features
    feature_count: Option<usize>,
}

impl CanonicalRecord {
    /// Serialize a parsed document to its canonical text.
    ///
    /// Output is compact JSON with every `<` written as `\u003c`. Outside
    /// string literals JSON has no `<`, so the text still denotes the same
    /// document, and no `</script` or `<!--` can reach an HTML parser.
    pub fn from_value(value: &Value) -> Self {
        let compact = value.to_string();
        let text = if compact.contains('<') {
            compact.replace('<', "\\u003c")
        } else {
            compact
        };

        Self {
            text,
            feature_count: value.as_array().map(Vec::len),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn feature_count(&self) -> Option<usize> {
        self.feature_count
    }
}
