//! The document tree value shared by every layer of the crate.
//!
//! A [`Node`] is a plain owned tree: cloning a node deep-copies the subtree,
//! and mutating a node only ever affects that subtree. Tags are carried as
//! free-form strings and select preprocessing (`!include`, `!expand`) or merge
//! behaviour (`!ordered_dict`).

mod guards;
mod serialize;

use std::fmt;

pub use guards::{expect_map, expect_scalar, expect_sequence, expect_sequence_of_len};

/// Tag requesting that a scalar path is replaced by the referenced document.
pub const INCLUDE_TAG: &str = "!include";

/// Tag requesting variable expansion inside a scalar template.
pub const EXPAND_TAG: &str = "!expand";

/// Tag marking a sequence of single-key maps as an ordered dictionary.
pub const ORDERED_DICT_TAG: &str = "!ordered_dict";

/// Structural kind of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An absent or explicit null value.
    Null,
    /// A scalar holding text.
    Scalar,
    /// An ordered list of nodes.
    Sequence,
    /// An ordered list of key/value pairs.
    Map,
}

impl NodeKind {
    /// Lower-case name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar => "scalar",
            Self::Sequence => "sequence",
            Self::Map => "map",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of a [`Node`] without its tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NodeValue {
    /// Null value.
    #[default]
    Null,
    /// Scalar text, kept verbatim.
    Scalar(String),
    /// Sequence of child nodes.
    Sequence(Vec<Node>),
    /// Map entries in document order.
    Map(Vec<(Node, Node)>),
}

/// A document tree node with an optional semantic tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    tag: Option<String>,
    value: NodeValue,
}

impl Node {
    /// Construct an untagged null node.
    #[must_use]
    pub const fn null() -> Self {
        Self {
            tag: None,
            value: NodeValue::Null,
        }
    }

    /// Construct an untagged scalar node.
    #[must_use]
    pub fn scalar(text: impl Into<String>) -> Self {
        Self::from_value(NodeValue::Scalar(text.into()))
    }

    /// Construct an untagged sequence node.
    #[must_use]
    pub fn sequence(items: impl IntoIterator<Item = Self>) -> Self {
        Self::from_value(NodeValue::Sequence(items.into_iter().collect()))
    }

    /// Construct an untagged map node from key/value pairs.
    #[must_use]
    pub fn map(entries: impl IntoIterator<Item = (Self, Self)>) -> Self {
        Self::from_value(NodeValue::Map(entries.into_iter().collect()))
    }

    /// Construct an untagged map node with scalar string keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_param::Node;
    ///
    /// let node = Node::string_map([("name", Node::scalar("aap"))]);
    /// assert_eq!(node.get("name").and_then(Node::as_scalar), Some("aap"));
    /// ```
    #[must_use]
    pub fn string_map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Self)>) -> Self {
        Self::map(
            entries
                .into_iter()
                .map(|(key, value)| (Self::scalar(key), value)),
        )
    }

    /// Wrap a [`NodeValue`] without a tag.
    #[must_use]
    pub const fn from_value(value: NodeValue) -> Self {
        Self { tag: None, value }
    }

    /// Attach `tag` and return the node.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Structural kind of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self.value {
            NodeValue::Null => NodeKind::Null,
            NodeValue::Scalar(_) => NodeKind::Scalar,
            NodeValue::Sequence(_) => NodeKind::Sequence,
            NodeValue::Map(_) => NodeKind::Map,
        }
    }

    /// Returns `true` for null nodes.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self.value, NodeValue::Null)
    }

    /// Returns `true` for scalar nodes.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self.value, NodeValue::Scalar(_))
    }

    /// Returns `true` for sequence nodes.
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self.value, NodeValue::Sequence(_))
    }

    /// Returns `true` for map nodes.
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self.value, NodeValue::Map(_))
    }

    /// Borrow the untagged content.
    #[must_use]
    pub const fn value(&self) -> &NodeValue {
        &self.value
    }

    /// Mutably borrow the untagged content.
    pub const fn value_mut(&mut self) -> &mut NodeValue {
        &mut self.value
    }

    /// Consume the node, returning its content and dropping the tag.
    #[must_use]
    pub fn into_value(self) -> NodeValue {
        self.value
    }

    /// Replace the content, keeping the tag.
    pub fn set_value(&mut self, value: NodeValue) {
        self.value = value;
    }

    /// The semantic tag, if any.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns `true` if the node carries exactly `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.as_deref() == Some(tag)
    }

    /// Replace the tag.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = Some(tag.into());
    }

    /// Remove the tag, returning the previous value.
    pub const fn clear_tag(&mut self) -> Option<String> {
        self.tag.take()
    }

    /// Scalar text, if this is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match &self.value {
            NodeValue::Scalar(text) => Some(text),
            _ => None,
        }
    }

    /// Sequence items, if this is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match &self.value {
            NodeValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Mutable sequence items, if this is a sequence.
    pub const fn as_sequence_mut(&mut self) -> Option<&mut Vec<Self>> {
        match &mut self.value {
            NodeValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Map entries, if this is a map.
    #[must_use]
    pub fn as_map(&self) -> Option<&[(Self, Self)]> {
        match &self.value {
            NodeValue::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Mutable map entries, if this is a map.
    pub const fn as_map_mut(&mut self) -> Option<&mut Vec<(Self, Self)>> {
        match &mut self.value {
            NodeValue::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Number of children: items of a sequence or entries of a map.
    ///
    /// Scalars and null have no children.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.value {
            NodeValue::Sequence(items) => items.len(),
            NodeValue::Map(entries) => entries.len(),
            NodeValue::Null | NodeValue::Scalar(_) => 0,
        }
    }

    /// Returns `true` when [`Node::len`] is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up the value for a scalar `key` in a map.
    ///
    /// The first matching entry wins.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k.as_scalar() == Some(key))
            .map(|(_, v)| v)
    }

    /// Mutable variant of [`Node::get`].
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Self> {
        self.as_map_mut()?
            .iter_mut()
            .find(|(k, _)| k.as_scalar() == Some(key))
            .map(|(_, v)| v)
    }

    /// Look up the sequence item at `index`.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&Self> {
        self.as_sequence()?.get(index)
    }

    /// Mutable variant of [`Node::item`].
    pub fn item_mut(&mut self, index: usize) -> Option<&mut Self> {
        self.as_sequence_mut()?.get_mut(index)
    }

    /// Set `key` to `value`, replacing the first existing entry.
    ///
    /// Any non-map content, null included, is replaced by an empty map first.
    pub fn insert(&mut self, name: impl Into<String>, value: Self) {
        let key = name.into();
        if !self.is_map() {
            self.value = NodeValue::Map(Vec::new());
        }
        if let Some(existing) = self.get_mut(&key) {
            *existing = value;
            return;
        }
        if let Some(entries) = self.as_map_mut() {
            entries.push((Self::scalar(key), value));
        }
    }

    /// Append `item` to a sequence, turning a non-sequence into one first.
    pub fn push(&mut self, item: Self) {
        if !self.is_sequence() {
            self.value = NodeValue::Sequence(Vec::new());
        }
        if let Some(items) = self.as_sequence_mut() {
            items.push(item);
        }
    }

    /// Immediate children: sequence items or map values, in document order.
    ///
    /// Map keys are not included.
    pub fn children(&self) -> impl Iterator<Item = &Self> {
        let (items, entries): (&[Self], &[(Self, Self)]) = match &self.value {
            NodeValue::Sequence(items) => (items, &[]),
            NodeValue::Map(entries) => (&[], entries),
            NodeValue::Null | NodeValue::Scalar(_) => (&[], &[]),
        };
        items.iter().chain(entries.iter().map(|(_, v)| v))
    }

    /// Mutable child at position `index` as enumerated by [`Node::children`].
    pub fn child_mut(&mut self, index: usize) -> Option<&mut Self> {
        match &mut self.value {
            NodeValue::Sequence(items) => items.get_mut(index),
            NodeValue::Map(entries) => entries.get_mut(index).map(|(_, v)| v),
            NodeValue::Null | NodeValue::Scalar(_) => None,
        }
    }

    /// Follow a path of child positions from this node.
    pub fn descend_mut(&mut self, path: &[usize]) -> Option<&mut Self> {
        path.iter()
            .try_fold(self, |node, &index| node.child_mut(index))
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::scalar(text)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::scalar(text)
    }
}

impl From<NodeValue> for Node {
    fn from(value: NodeValue) -> Self {
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests;
