//! Working directory control for tests that load documents by relative path.
//!
//! The working directory is shared by every test in the process, so entering
//! a directory takes a global lock that is held until the returned guard is
//! dropped. Dropping the guard also moves the process back to where it was.
//!
//! # Examples
//!
//! ```no_run
//! use tree_param_test_helpers::{DocumentTree, cwd};
//!
//! let tree = DocumentTree::new()?;
//! tree.write("conf/app.yaml", "a: 1\n")?;
//! let guard = cwd::enter(&tree)?;
//! // `conf/app.yaml` now names the file inside `tree`.
//! guard.restore()?;
//! # Ok::<_, anyhow::Error>(())
//! ```

use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use parking_lot::{Mutex, MutexGuard};

use crate::DocumentTree;

static WORKING_DIR: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

/// Holds the working directory lock and the directory to return to.
#[must_use = "the previous working directory comes back when this is dropped"]
pub struct WorkingDirGuard {
    previous: Utf8PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl WorkingDirGuard {
    /// Directory that was current before the guard was taken.
    #[must_use]
    pub fn previous(&self) -> &Utf8Path {
        &self.previous
    }

    /// Move back to [`WorkingDirGuard::previous`] now, reporting failure.
    ///
    /// The lock stays held until the guard is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory can no longer be entered.
    pub fn restore(&self) -> Result<()> {
        std::env::set_current_dir(&self.previous)
            .with_context(|| format!("return to {}", self.previous))
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        let _ignored = std::env::set_current_dir(&self.previous);
    }
}

/// Make `dir` the working directory until the guard is dropped.
///
/// The previous directory is read before anything changes, so a non UTF-8
/// working directory fails without moving the process.
///
/// # Errors
///
/// Returns an error if the current directory cannot be read or is not UTF-8,
/// or if `dir` cannot be entered.
pub fn set_dir(dir: &Utf8Path) -> Result<WorkingDirGuard> {
    let lock = WORKING_DIR.lock();
    let current = std::env::current_dir().context("read working directory")?;
    let previous = Utf8PathBuf::from_path_buf(current)
        .map_err(|path| anyhow!("working directory is not UTF-8: {}", path.display()))?;
    std::env::set_current_dir(dir).with_context(|| format!("enter {dir}"))?;
    Ok(WorkingDirGuard {
        previous,
        _lock: lock,
    })
}

/// Make the root of `tree` the working directory.
///
/// # Errors
///
/// See [`set_dir`].
pub fn enter(tree: &DocumentTree) -> Result<WorkingDirGuard> {
    set_dir(tree.path())
}
