use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throw-away directory tree for search tests.
pub struct TestTree {
    pub temp_dir: TempDir,
    root: PathBuf,
}

impl TestTree {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        // searches report canonical paths, /tmp may be a symlink
        let root = temp_dir.path().canonicalize()?;
        Ok(Self { temp_dir, root })
    }

    /// Create a file with its parent directories.
    pub fn file(&self, path: &str, content: &str) -> Result<PathBuf> {
        let file_path = self.root.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&file_path, content)?;
        Ok(file_path)
    }

    /// Create a directory with its parents.
    pub fn dir(&self, path: &str) -> Result<PathBuf> {
        let dir_path = self.root.join(path);
        std::fs::create_dir_all(&dir_path)?;
        Ok(dir_path)
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn join(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}
