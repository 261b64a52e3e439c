//! Container rules: optional values, sequences, fixed arrays and maps.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::error::{TraceEntry, TraceError, TraceResult};
use crate::node::{Node, expect_map, expect_sequence, expect_sequence_of_len};

use super::{FromNode, ToNode};

impl<T: FromNode> FromNode for Option<T> {
    fn from_node(node: &Node) -> TraceResult<Self> {
        if node.is_null() {
            Ok(None)
        } else {
            T::from_node(node).map(Some)
        }
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Owned(format!("optional {}", T::type_label()))
    }
}

impl<T: ToNode> ToNode for Option<T> {
    fn to_node(&self) -> Node {
        self.as_ref().map_or_else(Node::null, ToNode::to_node)
    }
}

impl<T: FromNode> FromNode for Box<T> {
    fn from_node(node: &Node) -> TraceResult<Self> {
        T::from_node(node).map(Self::new)
    }

    fn type_label() -> Cow<'static, str> {
        T::type_label()
    }
}

impl<T: ToNode + ?Sized> ToNode for Box<T> {
    fn to_node(&self) -> Node {
        self.as_ref().to_node()
    }
}

/// Decode every item of a sequence node, tracing failures by index.
fn parse_items<T: FromNode>(items: &[Node]) -> TraceResult<Vec<T>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::from_node(item).map_err(|err| {
                err.append_trace(TraceEntry::index(index, T::type_label(), item.kind()))
            })
        })
        .collect()
}

impl<T: FromNode> FromNode for Vec<T> {
    /// A null node decodes to an empty vector.
    fn from_node(node: &Node) -> TraceResult<Self> {
        if node.is_null() {
            return Ok(Self::new());
        }
        expect_sequence(node)?;
        parse_items(node.as_sequence().unwrap_or_default())
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Owned(format!("list of {}", T::type_label()))
    }
}

impl<T: ToNode> ToNode for Vec<T> {
    fn to_node(&self) -> Node {
        self.as_slice().to_node()
    }
}

impl<T: ToNode> ToNode for [T] {
    fn to_node(&self) -> Node {
        Node::sequence(self.iter().map(ToNode::to_node))
    }
}

impl<T: FromNode, const N: usize> FromNode for [T; N] {
    fn from_node(node: &Node) -> TraceResult<Self> {
        expect_sequence_of_len(node, N)?;
        let items = parse_items::<T>(node.as_sequence().unwrap_or_default())?;
        let len = items.len();
        Self::try_from(items).map_err(|_| {
            TraceError::new(format!("wrong sequence size, expected {N}, got {len}"))
        })
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Owned(format!("array of {N} {}", T::type_label()))
    }
}

impl<T: ToNode, const N: usize> ToNode for [T; N] {
    fn to_node(&self) -> Node {
        self.as_slice().to_node()
    }
}

/// Label a map key for trace output: its scalar text, or its kind.
pub(crate) fn key_name(key: &Node) -> String {
    key.as_scalar()
        .map_or_else(|| format!("<{}>", key.kind()), str::to_owned)
}

/// Decode every entry of a map node, tracing failures by key.
fn parse_entries<K: FromNode, V: FromNode>(node: &Node) -> TraceResult<Vec<(K, V)>> {
    expect_map(node)?;
    node.as_map()
        .unwrap_or_default()
        .iter()
        .map(|(key, value)| {
            let name = key_name(key);
            let parsed_key = K::from_node(key).map_err(|err| {
                err.append_trace(TraceEntry::field(name.clone(), K::type_label(), key.kind()))
            })?;
            let parsed_value = V::from_node(value).map_err(|err| {
                err.append_trace(TraceEntry::field(name, V::type_label(), value.kind()))
            })?;
            Ok((parsed_key, parsed_value))
        })
        .collect()
}

fn encode_entries<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> Node
where
    K: ToNode + 'a,
    V: ToNode + 'a,
{
    Node::map(entries.map(|(key, value)| (key.to_node(), value.to_node())))
}

impl<K, V> FromNode for BTreeMap<K, V>
where
    K: FromNode + Ord,
    V: FromNode,
{
    fn from_node(node: &Node) -> TraceResult<Self> {
        parse_entries(node).map(|entries| entries.into_iter().collect())
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Owned(format!("map of {} to {}", K::type_label(), V::type_label()))
    }
}

impl<K: ToNode, V: ToNode> ToNode for BTreeMap<K, V> {
    fn to_node(&self) -> Node {
        encode_entries(self.iter())
    }
}

impl<K, V, S> FromNode for HashMap<K, V, S>
where
    K: FromNode + Eq + Hash,
    V: FromNode,
    S: BuildHasher + Default,
{
    fn from_node(node: &Node) -> TraceResult<Self> {
        parse_entries(node).map(|entries| entries.into_iter().collect())
    }

    fn type_label() -> Cow<'static, str> {
        Cow::Owned(format!("map of {} to {}", K::type_label(), V::type_label()))
    }
}

impl<K: ToNode, V: ToNode, S> ToNode for HashMap<K, V, S> {
    fn to_node(&self) -> Node {
        encode_entries(self.iter())
    }
}
