//! Where documents come from.

use std::collections::BTreeMap;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

use crate::error::{ParamError, ParamResult};
use crate::node::Node;

use super::parser::parse_str_at;

/// Reads and parses documents by path.
///
/// The preprocessor resolves every `!include` through a source, so tests
/// and embedders can serve documents without touching the filesystem.
pub trait DocumentSource {
    /// Read and parse the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::File`] when the document cannot be read and
    /// [`ParamError::Yaml`] when it does not parse.
    fn read_document(&self, path: &Utf8Path) -> ParamResult<Node>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn read_document(&self, path: &Utf8Path) -> ParamResult<Node> {
        (**self).read_document(path)
    }
}

/// Reads documents from the local filesystem through `cap-std`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsSource;

impl FsSource {
    /// Read `path` through a capability on its containing directory.
    fn read_text(path: &Utf8Path) -> std::io::Result<String> {
        let name = path.file_name().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "document path does not name a file",
            )
        })?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        Dir::open_ambient_dir(dir, ambient_authority())?.read_to_string(name)
    }
}

impl DocumentSource for FsSource {
    fn read_document(&self, path: &Utf8Path) -> ParamResult<Node> {
        tracing::debug!(path = %path, "reading document");
        let text = Self::read_text(path).map_err(|err| ParamError::file_arc(path, err))?;
        parse_str_at(path, &text)
    }
}

/// Read and parse a single YAML file without preprocessing it.
///
/// # Errors
///
/// See [`DocumentSource::read_document`].
pub fn read_file(path: &Utf8Path) -> ParamResult<Node> {
    FsSource.read_document(path)
}

/// Serves documents held in memory, keyed by normalised path.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use tree_param::{DocumentSource, MemorySource};
///
/// let source = MemorySource::new().with_document("conf/a.yaml", "key: value");
/// let node = source.read_document(Utf8Path::new("conf/./a.yaml"))?;
/// assert_eq!(node.get("key").and_then(tree_param::Node::as_scalar), Some("value"));
/// # Ok::<_, std::sync::Arc<tree_param::ParamError>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    documents: BTreeMap<Utf8PathBuf, String>,
}

impl MemorySource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document and return the source.
    #[must_use]
    pub fn with_document(mut self, path: impl AsRef<Utf8Path>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// Add or replace a document.
    pub fn insert(&mut self, path: impl AsRef<Utf8Path>, text: impl Into<String>) {
        self.documents
            .insert(super::normalise(path.as_ref()), text.into());
    }
}

impl DocumentSource for MemorySource {
    fn read_document(&self, path: &Utf8Path) -> ParamResult<Node> {
        let key = super::normalise(path);
        let Some(text) = self.documents.get(&key) else {
            return Err(Arc::new(ParamError::file(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such document"),
            )));
        };
        parse_str_at(path, text)
    }
}
