//! Constructors shared by the file, preprocessing and merge layers.

use std::error::Error;
use std::sync::Arc;

use camino::Utf8Path;

use super::ParamError;

impl ParamError {
    /// Construct a [`ParamError::File`] for `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use tree_param::ParamError;
    ///
    /// let io = std::io::Error::from(std::io::ErrorKind::NotFound);
    /// let err = ParamError::file(Utf8Path::new("conf/a.yaml"), io);
    /// assert!(err.to_string().starts_with("failed to read 'conf/a.yaml'"));
    /// ```
    #[must_use]
    pub fn file(path: &Utf8Path, source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    /// Shared-ownership variant of [`ParamError::file`].
    #[must_use]
    pub fn file_arc(
        path: &Utf8Path,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Arc<Self> {
        Arc::new(Self::file(path, source))
    }

    /// Construct a [`ParamError::Yaml`] for a scanner failure in `path`.
    #[must_use]
    pub fn yaml(path: &Utf8Path, source: yaml_rust2::ScanError) -> Self {
        Self::Yaml {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns the decode trace when this is a [`ParamError::Decode`].
    #[must_use]
    pub const fn as_decode(&self) -> Option<&super::TraceError> {
        match self {
            Self::Decode(err) => Some(err),
            _ => None,
        }
    }
}
