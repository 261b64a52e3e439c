//! Temporary document trees for include and merge tests.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory holding YAML documents.
///
/// The directory is removed when the value is dropped.
///
/// # Examples
///
/// ```
/// use tree_param_test_helpers::DocumentTree;
///
/// let tree = DocumentTree::new()?;
/// let path = tree.write("conf/base.yaml", "a: 1\n")?;
/// assert!(path.ends_with("conf/base.yaml"));
/// # Ok::<_, anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct DocumentTree {
    root: Utf8PathBuf,
    _dir: TempDir,
}

impl DocumentTree {
    /// Create an empty tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created or its
    /// path is not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temporary document tree")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temporary path is not UTF-8: {}", path.display()))?;
        Ok(Self { root, _dir: dir })
    }

    /// Root directory of the tree.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `contents` to `relative`, creating parent directories.
    ///
    /// Returns the absolute path of the written file.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or the file cannot be written.
    pub fn write(&self, relative: impl AsRef<Utf8Path>, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(relative.as_ref());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }
}
