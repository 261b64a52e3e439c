//! Filesystem path rules. Paths are plain scalars.

use std::borrow::Cow;
use std::path::PathBuf;

use camino::Utf8PathBuf;

use crate::error::TraceResult;
use crate::node::Node;

use super::{FromNode, ToNode};

impl FromNode for Utf8PathBuf {
    fn from_node(node: &Node) -> TraceResult<Self> {
        String::from_node(node).map(Self::from)
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Borrowed("path")
    }
}

impl ToNode for Utf8PathBuf {
    fn to_node(&self) -> Node {
        Node::scalar(self.as_str())
    }
}

impl FromNode for PathBuf {
    fn from_node(node: &Node) -> TraceResult<Self> {
        String::from_node(node).map(Self::from)
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Borrowed("path")
    }
}

impl ToNode for PathBuf {
    fn to_node(&self) -> Node {
        Node::scalar(self.to_string_lossy())
    }
}
