/// Implement [`Decompose`](crate::Decompose), [`FromNode`](crate::FromNode)
/// and [`ToNode`](crate::ToNode) for a struct with named fields.
///
/// Each member is written as `required name: Type = "description"` or
/// `optional name: Type = "description"`. Members are emitted in the listed
/// order and the decomposition is built once per process.
///
/// # Examples
///
/// ```
/// use tree_param::{Node, decompose_struct, parse};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// decompose_struct!(Server {
///     required host: String = "host name to bind",
///     optional port: u16 = "listening port",
/// });
///
/// let node = Node::string_map([("host", Node::scalar("localhost"))]);
/// let server: Server = parse(&node)?;
/// assert_eq!(server, Server { host: "localhost".into(), port: 0 });
/// # Ok::<_, tree_param::TraceError>(())
/// ```
#[macro_export]
macro_rules! decompose_struct {
    (@required required) => { true };
    (@required optional) => { false };
    ($ty:ty { $( $req:ident $field:ident : $fty:ty = $desc:expr ),* $(,)? }) => {
        impl $crate::Decompose for $ty {
            fn decomposition() -> &'static $crate::Decomposition<Self> {
                static DECOMPOSITION: ::std::sync::OnceLock<$crate::Decomposition<$ty>> =
                    ::std::sync::OnceLock::new();
                DECOMPOSITION.get_or_init(|| {
                    $crate::Decomposition::new(::std::vec![
                        $(
                            $crate::MemberDescriptor::field(
                                ::std::stringify!($field),
                                <$fty as $crate::FromNode>::type_label(),
                                $desc,
                                $crate::decompose_struct!(@required $req),
                                |object: &$ty| &object.$field,
                                |object: &mut $ty| &mut object.$field,
                            ),
                        )*
                    ])
                })
            }
        }

        $crate::node_codec_via_decomposition!($ty);
    };
}

/// Implement [`FromNode`](crate::FromNode) and [`ToNode`](crate::ToNode) for
/// a type with a hand-written [`Decompose`](crate::Decompose) impl.
#[macro_export]
macro_rules! node_codec_via_decomposition {
    ($ty:ty) => {
        impl $crate::FromNode for $ty {
            fn from_node(node: &$crate::Node) -> $crate::TraceResult<Self> {
                $crate::parse_decomposed(node)
            }

            fn type_label() -> ::std::borrow::Cow<'static, str> {
                ::std::borrow::Cow::Borrowed(::std::stringify!($ty))
            }
        }

        impl $crate::ToNode for $ty {
            fn to_node(&self) -> $crate::Node {
                $crate::encode_decomposed(self)
            }
        }
    };
}
