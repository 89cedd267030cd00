//! Scratch directories holding base and overlay YAML files.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Temporary directory removed when dropped.
pub struct ScratchDir {
    // Held for its drop side effect.
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl ScratchDir {
    /// Creates a fresh scratch directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its path is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create scratch directory")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("scratch path is not UTF-8: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Path of the scratch directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.root
    }

    /// Writes `contents` to `relative` inside the directory, creating parent
    /// directories as needed, and returns the full path.
    ///
    /// # Errors
    ///
    /// Returns an error when the file or its parents cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Writes an overlay named `name` (stored as `<name>.yaml`).
    ///
    /// # Errors
    ///
    /// See [`ScratchDir::write`].
    pub fn write_overlay(&self, name: &str, contents: &str) -> Result<Utf8PathBuf> {
        self.write(&format!("{name}.yaml"), contents)
    }
}
