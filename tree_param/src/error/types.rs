//! Primary error enum for loading, preprocessing and merging documents.

use thiserror::Error;

use super::TraceError;

/// Errors raised outside of plain node decoding.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParamError {
    /// A node could not be decoded into the requested type.
    #[error(transparent)]
    Decode(#[from] TraceError),

    /// A document could not be read.
    #[error("failed to read '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: camino::Utf8PathBuf,
        /// Underlying error reported by the reader.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A document was read but is not valid YAML.
    #[error("failed to parse '{path}': {source}")]
    Yaml {
        /// Path of the offending document, or `<inline>` for strings.
        path: camino::Utf8PathBuf,
        /// Scanner error with line and column information.
        #[source]
        source: yaml_rust2::ScanError,
    },

    /// A directive tag was attached to a node of the wrong kind.
    #[error("{tag} needs a {expected}, got {found}")]
    InvalidTagPayload {
        /// Tag that was being resolved.
        tag: &'static str,
        /// Node kind the tag requires.
        expected: &'static str,
        /// Node kind that was found instead.
        found: crate::NodeKind,
    },

    /// An `!include` path expanded to nothing.
    #[error("tried to include empty path (from '{template}')")]
    EmptyInclude {
        /// Template that expanded to the empty string.
        template: String,
    },

    /// A template referenced a variable that is not defined.
    #[error("undefined variable `{name}' in '{template}'")]
    UndefinedVariable {
        /// Name of the missing variable.
        name: String,
        /// Template being expanded.
        template: String,
    },

    /// A template could not be tokenised.
    #[error("malformed template '{template}': {message}")]
    MalformedTemplate {
        /// Template being expanded.
        template: String,
        /// What is wrong with it.
        message: String,
    },

    /// A document includes itself, directly or through other documents.
    #[error("cyclic include detected: {cycle}")]
    CyclicInclude {
        /// Chain of documents participating in the cycle.
        cycle: String,
    },

    /// An ordered dictionary entry is not a single-key map.
    #[error("ordered dictionary should only contain single item map, got {found} at index {index}")]
    OrderedDictionary {
        /// Position of the offending entry.
        index: usize,
        /// Description of what was found instead.
        found: String,
    },

    /// A scheduled node vanished from the tree during preprocessing.
    #[error("pending node at child path {path:?} is missing from the document")]
    DanglingNode {
        /// Child positions from the root.
        path: Vec<usize>,
    },

    /// A node tree could not be written as YAML text.
    #[error("failed to emit YAML: {0}")]
    Emit(String),
}
