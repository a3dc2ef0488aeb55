//! Filesystem persistence: the prior snapshot and the run's output files.
//!
//! Outputs are staged before anything is replaced. Every file is rendered in
//! memory, written to a temporary file next to its destination, and only when
//! all of them are written are they renamed into place. A failure while
//! rendering or staging leaves the previous outputs untouched.

use std::io::Write;
use std::path::{Path, PathBuf};

use swatch_core::{
    ColorStyleRecord, OutputSink, PriorStateSource, Snapshot, SnapshotState, StoreError,
    VersionBump,
};
use swatch_render::{OutputFormat, Renderer};
use tempfile::NamedTempFile;

/// Reads and writes outputs under one directory, plus the bump label file.
pub struct FileStore {
    out_dir: PathBuf,
    bump_file: PathBuf,
    formats: Vec<OutputFormat>,
    renderer: Renderer,
}

impl FileStore {
    /// Creates a store writing every built-in format.
    pub fn new(out_dir: impl Into<PathBuf>, bump_file: impl Into<PathBuf>, renderer: Renderer) -> Self {
        Self {
            out_dir: out_dir.into(),
            bump_file: bump_file.into(),
            formats: OutputFormat::ALL.to_vec(),
            renderer,
        }
    }

    /// Restricts the built-in formats written. JSON is always written.
    pub fn with_formats(mut self, formats: Vec<OutputFormat>) -> Self {
        self.formats = formats;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn bump_file(&self) -> &Path {
        &self.bump_file
    }

    /// Path of the persisted snapshot the next run compares against.
    pub fn snapshot_path(&self) -> PathBuf {
        self.out_dir.join(OutputFormat::Json.file_name())
    }
}

impl PriorStateSource for FileStore {
    fn load_prior_snapshot(&self) -> Result<SnapshotState, StoreError> {
        let path = self.snapshot_path();
        let source = match std::fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no prior snapshot");
                return Ok(SnapshotState::Empty);
            }
            Err(err) => return Err(StoreError::io(path, err)),
        };

        let snapshot =
            Snapshot::from_json(&source).map_err(|source| StoreError::Parse { path, source })?;
        Ok(SnapshotState::Retrieved(snapshot))
    }
}

impl OutputSink for FileStore {
    fn persist(&self, records: &[ColorStyleRecord], bump: VersionBump) -> Result<(), StoreError> {
        let files = self
            .renderer
            .render_all(&self.formats, records)
            .map_err(|err| StoreError::Render(err.to_string()))?;

        ensure_dir(&self.out_dir)?;
        let bump_dir = parent_dir(&self.bump_file);
        ensure_dir(&bump_dir)?;

        let mut staged = Vec::with_capacity(files.len() + 1);
        for file in &files {
            let destination = self.out_dir.join(&file.file_name);
            staged.push(stage(&self.out_dir, destination, &file.contents)?);
        }
        staged.push(stage(&bump_dir, self.bump_file.clone(), bump.label())?);

        for (temp, destination) in staged {
            temp.persist(&destination)
                .map_err(|err| StoreError::io(&destination, err.error))?;
            tracing::debug!(path = %destination.display(), "wrote output");
        }
        Ok(())
    }
}

fn stage(
    dir: &Path,
    destination: PathBuf,
    contents: &str,
) -> Result<(NamedTempFile, PathBuf), StoreError> {
    let mut temp = NamedTempFile::new_in(dir).map_err(|err| StoreError::io(dir, err))?;
    temp.write_all(contents.as_bytes())
        .and_then(|()| temp.flush())
        .map_err(|err| StoreError::io(temp.path(), err))?;
    Ok((temp, destination))
}

fn ensure_dir(dir: &Path) -> Result<(), StoreError> {
    std::fs::create_dir_all(dir).map_err(|err| StoreError::io(dir, err))
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("VERSION_BUMP_TYPE")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("out/BUMP")), PathBuf::from("out"));
    }

    #[test]
    fn test_snapshot_path() {
        let store = FileStore::new("build", "VERSION_BUMP_TYPE", Renderer::new().unwrap());
        assert_eq!(store.snapshot_path(), PathBuf::from("build/colors.json"));
    }
}
