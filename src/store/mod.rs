//! Content store: the local directory tree mirroring the site
//!
//! All paths handed to the store are site-relative (they start with the
//! sanitized domain directory); the store anchors them under its base
//! directory. Parent directories are created on demand, and the site
//! directory reset on [`MirrorStore::reset_site_dir`] is destructive by
//! contract: a fresh mirror never merges with a previous run.

use std::io;
use std::path::{Path, PathBuf};

/// Filesystem store for downloaded resources
#[derive(Debug, Clone)]
pub struct MirrorStore {
    base: PathBuf,
}

impl MirrorStore {
    /// Creates a store anchored at `base` (the directory the site directory
    /// will be created in)
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Resolves a site-relative path against the store base
    pub fn full_path(&self, local: &Path) -> PathBuf {
        self.base.join(local)
    }

    /// Removes any pre-existing site directory and recreates it empty
    ///
    /// Destructive reset: there is no incremental resume, a run always starts
    /// from a clean directory.
    pub fn reset_site_dir(&self, dir_name: &str) -> io::Result<PathBuf> {
        let dir = self.base.join(dir_name);

        if dir.exists() {
            tracing::debug!("Removing pre-existing site directory {}", dir.display());
            std::fs::remove_dir_all(&dir)?;
        }
        std::fs::create_dir_all(&dir)?;

        Ok(dir)
    }

    /// Whether a file already exists at the site-relative path
    pub fn exists(&self, local: &Path) -> bool {
        self.full_path(local).exists()
    }

    /// Creates the parent directory of a site-relative path if missing
    pub async fn ensure_parent(&self, local: &Path) -> io::Result<()> {
        if let Some(parent) = self.full_path(local).parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Writes decoded text to a site-relative path, creating parents on demand
    pub async fn write_text(&self, local: &Path, text: &str) -> io::Result<()> {
        self.ensure_parent(local).await?;
        tokio::fs::write(self.full_path(local), text).await
    }

    /// Reads a stored file back as trimmed non-empty lines
    ///
    /// Returns `Ok(None)` when the file no longer exists - a queued page
    /// record whose backing file vanished is a benign race, not an error.
    pub async fn read_trimmed_lines(&self, local: &Path) -> io::Result<Option<Vec<String>>> {
        let bytes = match tokio::fs::read(self.full_path(local)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        let text = String::from_utf8_lossy(&bytes);
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Some(lines))
    }
}
