//! Decode errors carrying a breadcrumb trail from the document root.

use std::fmt;

use thiserror::Error;

use crate::node::NodeKind;

/// Position of a trace entry within its parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceKey {
    /// A named map entry or struct member.
    Field(String),
    /// A sequence index.
    Index(usize),
}

impl fmt::Display for TraceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// One breadcrumb in a [`TraceError`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceEntry {
    /// Where the failing child sits within its parent.
    pub key: TraceKey,
    /// Human readable type the child was being decoded as.
    pub declared_type: String,
    /// Kind of the node that failed to decode.
    pub node_kind: NodeKind,
}

impl TraceEntry {
    /// Entry for a named member or map key.
    #[must_use]
    pub fn field(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        node_kind: NodeKind,
    ) -> Self {
        Self {
            key: TraceKey::Field(name.into()),
            declared_type: declared_type.into(),
            node_kind,
        }
    }

    /// Entry for a sequence index.
    #[must_use]
    pub fn index(index: usize, declared_type: impl Into<String>, node_kind: NodeKind) -> Self {
        Self {
            key: TraceKey::Index(index),
            declared_type: declared_type.into(),
            node_kind,
        }
    }
}

/// A decode failure with the path that led to it.
///
/// The trace is stored innermost-first: converters append one entry each as
/// the error propagates outward, so the last entry is closest to the root.
///
/// # Examples
///
/// ```
/// use tree_param::{NodeKind, TraceEntry, TraceError};
///
/// let err = TraceError::new("invalid integer value: abc")
///     .append_trace(TraceEntry::index(0, "i32", NodeKind::Scalar))
///     .append_trace(TraceEntry::field("list", "Vec<i32>", NodeKind::Sequence))
///     .append_trace(TraceEntry::field("sub", "Sub", NodeKind::Map));
/// assert_eq!(err.to_string(), "sub.list[0]: invalid integer value: abc");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}", self.render())]
pub struct TraceError {
    message: String,
    trace: Vec<TraceEntry>,
}

impl TraceError {
    /// Create an error without trace entries.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trace: Vec::new(),
        }
    }

    /// The failure message without the path.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Trace entries, innermost first.
    #[must_use]
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    /// Add one breadcrumb on the way out.
    #[must_use]
    pub fn append_trace(mut self, entry: TraceEntry) -> Self {
        self.trace.push(entry);
        self
    }

    /// Render the trace as a root-first path such as `a.b[2]`.
    #[must_use]
    pub fn path(&self) -> String {
        let mut out = String::new();
        for entry in self.trace.iter().rev() {
            match &entry.key {
                TraceKey::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                TraceKey::Index(index) => {
                    out.push('[');
                    out.push_str(&index.to_string());
                    out.push(']');
                }
            }
        }
        out
    }

    fn render(&self) -> String {
        if self.trace.is_empty() {
            self.message.clone()
        } else {
            format!("{}: {}", self.path(), self.message)
        }
    }
}

/// Result of decoding a node.
pub type TraceResult<T> = Result<T, TraceError>;
