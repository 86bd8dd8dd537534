use std::path::{Path, PathBuf};

/// Fixed name of the generated report inside the output directory
pub const REPORT_FILE_NAME: &str = "cucumber-pretty-report.html";

/// Merged report document and where it goes
#[derive(Debug, Clone)]
pub struct OutputArtifact {
    pub directory: PathBuf,
    pub contents: String,
}

impl OutputArtifact {
    pub fn new(directory: &Path, contents: String) -> Self {
        Self {
            directory: directory.to_path_buf(),
            contents,
        }
    }

    /// Full destination path of the report file
    pub fn path(&self) -> PathBuf {
        self.directory.join(REPORT_FILE_NAME)
    }
}
