//! Path contexts and work items for a preprocessing pass.

use camino::{Utf8Path, Utf8PathBuf};

use super::Variables;

/// Directory and optional file that relative includes resolve against.
#[derive(Clone, Debug)]
pub(super) struct PathContext {
    pub(super) dir: Utf8PathBuf,
    pub(super) file: Option<Utf8PathBuf>,
}

impl PathContext {
    pub(super) fn for_file(file: &Utf8Path) -> Self {
        Self {
            dir: file.parent().map(Utf8Path::to_path_buf).unwrap_or_default(),
            file: Some(file.to_path_buf()),
        }
    }

    pub(super) fn for_directory(dir: &Utf8Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            file: None,
        }
    }

    /// Overlay `DIR` and `FILE` for this context onto `variables`.
    pub(super) fn apply(&self, variables: &mut Variables) {
        let dir = if self.dir.as_str().is_empty() {
            "."
        } else {
            self.dir.as_str()
        };
        variables.insert("DIR".to_owned(), dir.to_owned());
        variables.remove("FILE");
        if let Some(file) = &self.file {
            variables.insert("FILE".to_owned(), file.as_str().to_owned());
        }
    }
}

/// Nodes still to visit under one path context.
///
/// Pending nodes are addressed by child positions from the root so that the
/// tree can be mutated while they wait.
#[derive(Debug)]
pub(super) struct Work {
    pub(super) context: PathContext,
    pub(super) pending: Vec<Vec<usize>>,
    /// Documents that led to this item, outermost first.
    pub(super) chain: Vec<Utf8PathBuf>,
}

impl Work {
    pub(super) const fn new(
        context: PathContext,
        pending: Vec<Vec<usize>>,
        chain: Vec<Utf8PathBuf>,
    ) -> Self {
        Self {
            context,
            pending,
            chain,
        }
    }
}
