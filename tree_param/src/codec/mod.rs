//! Type-directed conversion between native values and [`Node`] trees.
//!
//! Every convertible type implements [`FromNode`] and/or [`ToNode`]. The trait
//! bound is the capability check: generic code that needs a round-trippable
//! value asks for [`NodeCodec`], and unsupported types are rejected at compile
//! time rather than at runtime.
//!
//! Composite converters (sequences, arrays, maps, decomposed structs) add one
//! [`TraceEntry`] to a failing child's error before passing it on, so a
//! failure reaching the caller names the full path from the document root.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeMap;
//! use tree_param::{Node, encode, parse};
//!
//! let node = Node::string_map([("a", Node::scalar("1")), ("b", Node::scalar("2"))]);
//! let parsed: BTreeMap<String, u8> = parse(&node)?;
//! assert_eq!(parsed.get("b"), Some(&2));
//! assert_eq!(encode(&parsed), node);
//! # Ok::<_, tree_param::TraceError>(())
//! ```

mod collections;
mod paths;
mod scalar;

use std::borrow::Cow;

use crate::error::{TraceEntry, TraceError, TraceResult};
use crate::node::Node;

pub(crate) use collections::key_name;

/// Types that can be decoded from a [`Node`].
pub trait FromNode: Sized {
    /// Decode `node` into a value.
    ///
    /// # Errors
    ///
    /// Returns a [`TraceError`] when the node has the wrong shape or the
    /// scalar text does not parse.
    fn from_node(node: &Node) -> TraceResult<Self>;

    /// Human readable type name used in trace entries.
    #[must_use]
    fn type_label() -> Cow<'static, str> {
        Cow::Borrowed(std::any::type_name::<Self>())
    }
}

/// Types that can be encoded as a [`Node`].
pub trait ToNode {
    /// Encode the value. Encoding never fails.
    fn to_node(&self) -> Node;
}

/// Marker for types that convert in both directions.
pub trait NodeCodec: FromNode + ToNode {}

impl<T: FromNode + ToNode> NodeCodec for T {}

/// Decode `node` as `T`.
///
/// # Errors
///
/// Propagates the [`TraceError`] produced by `T`'s decoder.
pub fn parse<T: FromNode>(node: &Node) -> TraceResult<T> {
    T::from_node(node)
}

/// Encode `value` as a [`Node`].
#[must_use]
pub fn encode<T: ToNode + ?Sized>(value: &T) -> Node {
    value.to_node()
}

/// Decode the value stored under `key` in a map node.
///
/// # Errors
///
/// Fails with `no such key` when the key is absent, or with the child's
/// decode error (traced by `key`).
pub fn parse_child<T: FromNode>(node: &Node, key: &str) -> TraceResult<T> {
    let child = node
        .get(key)
        .ok_or_else(|| TraceError::new(format!("no such key: {key}")))?;
    parse_traced(child, key)
}

/// Overwrite `output` with the value under `key`, if the key is present.
///
/// Returns whether the key was found.
///
/// # Errors
///
/// Propagates the child's decode error (traced by `key`).
pub fn parse_child_into<T: FromNode>(node: &Node, key: &str, output: &mut T) -> TraceResult<bool> {
    match node.get(key) {
        Some(child) => {
            *output = parse_traced(child, key)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn parse_traced<T: FromNode>(child: &Node, key: &str) -> TraceResult<T> {
    T::from_node(child)
        .map_err(|err| err.append_trace(TraceEntry::field(key, T::type_label(), child.kind())))
}

impl FromNode for Node {
    fn from_node(node: &Node) -> TraceResult<Self> {
        Ok(node.clone())
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Borrowed("node")
    }
}

impl ToNode for Node {
    fn to_node(&self) -> Node {
        self.clone()
    }
}

impl<T: ToNode + ?Sized> ToNode for &T {
    fn to_node(&self) -> Node {
        (**self).to_node()
    }
}
