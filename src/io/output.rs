use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::models::OutputArtifact;

/// Create `dir` and any missing ancestors
pub fn ensure_directory(dir: &Path) -> Result<(), ReportError> {
    std::fs::create_dir_all(dir).map_err(|source| ReportError::OutputUnwritable {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write the artifact as UTF-8, replacing any previous report.
///
/// Returns the absolute path of the written file.
pub fn write_artifact(artifact: &OutputArtifact) -> Result<PathBuf, ReportError> {
    let path = artifact.path();
    let contents = artifact.contents.as_bytes();
    replace_file(&artifact.directory, &path, |writer| writer.write_all(contents))?;
    Ok(absolute(&path))
}

/// Stage `fill`'s output in a scratch file next to `target`, then rename it
/// over `target`. On any failure `target` keeps its previous state and the
/// scratch file is removed.
fn replace_file<F>(dir: &Path, target: &Path, fill: F) -> Result<(), ReportError>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let unwritable = |source| ReportError::OutputUnwritable {
        path: target.to_path_buf(),
        source,
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".cucumber-report-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut staged = builder.tempfile_in(dir).map_err(unwritable)?;

    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        fill(&mut writer).map_err(unwritable)?;
        writer.flush().map_err(unwritable)?;
    }

    staged
        .persist(target)
        .map_err(|persist| unwritable(persist.error))?;
    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
