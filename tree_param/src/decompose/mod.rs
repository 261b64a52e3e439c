//! Reflection metadata that lets aggregate types take part in conversion.
//!
//! A [`Decomposition`] is an ordered list of [`MemberDescriptor`]s, one per
//! member, each carrying a name, a human readable type label, a description,
//! a required flag and typed accessors. Types expose their decomposition
//! through [`Decompose`]; [`decompose_struct!`](crate::decompose_struct) builds
//! one from plain fields and [`node_codec_via_decomposition!`](crate::node_codec_via_decomposition)
//! wires a hand-written one into the codec traits.
//!
//! Decoding through a decomposition is strict: unknown keys and missing
//! required members are both errors.

mod descriptor;
mod macros;

use crate::codec::{ToNode, key_name};
use crate::error::{TraceEntry, TraceError, TraceResult};
use crate::node::{Node, expect_map};

pub use descriptor::{MemberDescriptor, MemberInfo};

/// Ordered member descriptors for `T`.
pub struct Decomposition<T> {
    members: Vec<MemberDescriptor<T>>,
}

impl<T> Decomposition<T> {
    /// Build a decomposition from descriptors in emission order.
    #[must_use]
    pub const fn new(members: Vec<MemberDescriptor<T>>) -> Self {
        Self { members }
    }

    /// Member descriptors in declaration order.
    #[must_use]
    pub fn members(&self) -> &[MemberDescriptor<T>] {
        &self.members
    }

    /// Find the first member named `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<(usize, &MemberDescriptor<T>)> {
        self.members
            .iter()
            .enumerate()
            .find(|(_, member)| member.info().name == name)
    }

    /// Encode `object` as a map with one entry per member, in order.
    #[must_use]
    pub fn encode(&self, object: &T) -> Node {
        let mut result = Node::map([]);
        for member in &self.members {
            result.insert(member.info().name.clone(), member.encode(object));
        }
        result
    }

    /// Decode the members listed in `node` into `object`.
    ///
    /// Members absent from `node` keep their current value unless they are
    /// required.
    ///
    /// # Errors
    ///
    /// Fails when `node` is not a map, when a key matches no member
    /// (`unknown property`), when a member fails to decode (traced by the
    /// member name) or when a required member is absent (`missing property`).
    pub fn decode_into(&self, node: &Node, object: &mut T) -> TraceResult<()> {
        expect_map(node)?;
        let mut parsed = vec![false; self.members.len()];

        for (key, value) in node.as_map().unwrap_or_default() {
            let Some((index, member)) = key.as_scalar().and_then(|name| self.find(name)) else {
                return Err(TraceError::new(format!(
                    "unknown property `{}'",
                    key_name(key)
                )));
            };
            member.decode(object, value).map_err(|err| {
                err.append_trace(TraceEntry::field(
                    member.info().name.clone(),
                    member.info().type_label.clone(),
                    value.kind(),
                ))
            })?;
            if let Some(flag) = parsed.get_mut(index) {
                *flag = true;
            }
        }

        for (member, was_parsed) in self.members.iter().zip(&parsed) {
            if member.info().required && !was_parsed {
                return Err(TraceError::new(format!(
                    "missing property `{}'",
                    member.info().name
                )));
            }
        }
        Ok(())
    }

    /// Describe the schema as a map of member name to its metadata.
    #[must_use]
    pub fn describe(&self) -> Node {
        let mut result = Node::map([]);
        for member in &self.members {
            let info = member.info();
            result.insert(
                info.name.clone(),
                Node::string_map([
                    ("type", Node::scalar(info.type_label.as_str())),
                    ("description", Node::scalar(info.description.as_str())),
                    ("required", info.required.to_node()),
                ]),
            );
        }
        result
    }
}

impl<T: Default> Decomposition<T> {
    /// Decode a fresh `T`, starting from its default value.
    ///
    /// # Errors
    ///
    /// See [`Decomposition::decode_into`].
    pub fn decode(&self, node: &Node) -> TraceResult<T> {
        let mut object = T::default();
        self.decode_into(node, &mut object)?;
        Ok(object)
    }
}

impl<T> std::fmt::Debug for Decomposition<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.members.iter().map(MemberDescriptor::info))
            .finish()
    }
}

/// Types with a registered [`Decomposition`].
///
/// Implementations normally build the decomposition once and keep it in a
/// `static` [`std::sync::OnceLock`]; [`decompose_struct!`](crate::decompose_struct)
/// does this automatically.
pub trait Decompose: Default + Sized + 'static {
    /// The decomposition of `Self`.
    fn decomposition() -> &'static Decomposition<Self>;
}

/// Encode a decomposable value as a map node.
#[must_use]
pub fn encode_decomposed<T: Decompose>(object: &T) -> Node {
    T::decomposition().encode(object)
}

/// Decode a decomposable value from a map node.
///
/// # Errors
///
/// See [`Decomposition::decode_into`].
pub fn parse_decomposed<T: Decompose>(node: &Node) -> TraceResult<T> {
    T::decomposition().decode(node)
}

#[cfg(test)]
mod tests;
