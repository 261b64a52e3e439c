use std::fmt;

use crate::codec::{FromNode, ToNode};
use crate::error::TraceResult;
use crate::node::Node;

type Encoder<T> = Box<dyn Fn(&T) -> Node + Send + Sync>;
type Decoder<T> = Box<dyn Fn(&mut T, &Node) -> TraceResult<()> + Send + Sync>;

/// Descriptive metadata for one member of a decomposition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberInfo {
    /// Key used for the member in map nodes.
    pub name: String,
    /// Human readable type label used in trace entries and schemas.
    pub type_label: String,
    /// Free-form description of the member.
    pub description: String,
    /// Whether decoding fails when the member is absent.
    pub required: bool,
}

/// One member of a [`Decomposition`](super::Decomposition) with typed accessors.
pub struct MemberDescriptor<T> {
    info: MemberInfo,
    encode: Encoder<T>,
    decode: Decoder<T>,
}

impl<T: 'static> MemberDescriptor<T> {
    /// Describe a directly accessible field.
    ///
    /// `get` and `get_mut` project the field out of the aggregate; the field
    /// type supplies the conversion.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_param::{MemberDescriptor, Node};
    ///
    /// #[derive(Default)]
    /// struct Limits {
    ///     retries: u8,
    /// }
    ///
    /// let member = MemberDescriptor::field(
    ///     "retries",
    ///     "integer",
    ///     "attempts before giving up",
    ///     true,
    ///     |l: &Limits| &l.retries,
    ///     |l: &mut Limits| &mut l.retries,
    /// );
    /// let mut limits = Limits::default();
    /// member.decode(&mut limits, &Node::scalar("3"))?;
    /// assert_eq!(limits.retries, 3);
    /// assert_eq!(member.encode(&limits), Node::scalar("3"));
    /// # Ok::<_, tree_param::TraceError>(())
    /// ```
    #[must_use]
    pub fn field<M, F, G>(
        name: impl Into<String>,
        type_label: impl Into<String>,
        description: impl Into<String>,
        required: bool,
        get: F,
        get_mut: G,
    ) -> Self
    where
        M: FromNode + ToNode + 'static,
        F: Fn(&T) -> &M + Send + Sync + 'static,
        G: Fn(&mut T) -> &mut M + Send + Sync + 'static,
    {
        Self::with_info(
            MemberInfo {
                name: name.into(),
                type_label: type_label.into(),
                description: description.into(),
                required,
            },
            move |object| get(object).to_node(),
            move |object, node| {
                *get_mut(object) = M::from_node(node)?;
                Ok(())
            },
        )
    }

    /// Describe a member reached through getter/setter functions.
    ///
    /// Use this for aggregates whose state is private: `getter` produces the
    /// member value and `setter` stores a decoded one.
    #[must_use]
    pub fn projection<M, F, G>(
        name: impl Into<String>,
        type_label: impl Into<String>,
        description: impl Into<String>,
        required: bool,
        getter: F,
        setter: G,
    ) -> Self
    where
        M: FromNode + ToNode + 'static,
        F: Fn(&T) -> M + Send + Sync + 'static,
        G: Fn(&mut T, M) + Send + Sync + 'static,
    {
        Self::with_info(
            MemberInfo {
                name: name.into(),
                type_label: type_label.into(),
                description: description.into(),
                required,
            },
            move |object| getter(object).to_node(),
            move |object, node| {
                setter(object, M::from_node(node)?);
                Ok(())
            },
        )
    }

    /// Build a descriptor from raw encode and decode closures.
    #[must_use]
    pub fn with_info(
        info: MemberInfo,
        encode: impl Fn(&T) -> Node + Send + Sync + 'static,
        decode: impl Fn(&mut T, &Node) -> TraceResult<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            info,
            encode: Box::new(encode),
            decode: Box::new(decode),
        }
    }
}

impl<T> MemberDescriptor<T> {
    /// Metadata for this member.
    #[must_use]
    pub const fn info(&self) -> &MemberInfo {
        &self.info
    }

    /// Encode this member of `object`.
    #[must_use]
    pub fn encode(&self, object: &T) -> Node {
        (self.encode)(object)
    }

    /// Decode `node` into this member of `object`.
    ///
    /// # Errors
    ///
    /// Propagates the member type's conversion error unchanged; the caller
    /// adds the trace entry naming the member.
    pub fn decode(&self, object: &mut T, node: &Node) -> TraceResult<()> {
        (self.decode)(object, node)
    }
}

impl<T> fmt::Debug for MemberDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}
