//! Type-directed conversion between YAML-like document trees and Rust values.
//!
//! Documents are held as [`Node`] trees: null, scalar text, sequences and
//! ordered maps, each optionally carrying a tag. On top of that model the
//! crate provides:
//!
//! - [`FromNode`] / [`ToNode`] conversions for primitives, strings, paths,
//!   options, sequences, fixed arrays and maps, and for structs through a
//!   [`Decomposition`] of their members. Failures carry the path to the
//!   offending node, e.g. `sub.list[0]: invalid integer value: abc`.
//! - A [`Preprocessor`] resolving `!include <path>` and `!expand <template>`
//!   directives with `$NAME` / `${NAME}` substitution and the ambient `$DIR`
//!   and `$FILE` variables.
//! - [`merge`], overlaying documents with later layers taking precedence and
//!   `!ordered_dict` sequences patched by key.
//!
//! # Examples
//!
//! ```
//! use tree_param::{Node, decompose_struct, merge, parse, parse_str};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Server {
//!     host: String,
//!     ports: Vec<u16>,
//! }
//!
//! decompose_struct!(Server {
//!     required host: String = "host name to bind",
//!     optional ports: Vec<u16> = "listening ports",
//! });
//!
//! let mut config = parse_str("host: localhost\nports: [80]")?;
//! merge(&mut config, parse_str("ports: [8080, 8443]")?)?;
//! let server: Server = parse(&config)?;
//! assert_eq!(server.ports, [8080, 8443]);
//! # Ok::<_, std::sync::Arc<tree_param::ParamError>>(())
//! ```

mod codec;
mod decompose;
mod error;
mod file;
mod load;
mod merge;
mod node;
mod preprocess;
mod result_ext;

pub use codec::{FromNode, NodeCodec, ToNode, encode, parse, parse_child, parse_child_into};
pub use decompose::{
    Decompose, Decomposition, MemberDescriptor, MemberInfo, encode_decomposed, parse_decomposed,
};
pub use error::{ParamError, ParamResult, TraceEntry, TraceError, TraceKey, TraceResult};
pub use file::{
    DocumentSource, FsSource, MemorySource, join_normalised, normalise, parse_str, parse_str_at,
    read_file, to_yaml_string,
};
pub use load::{load, load_layered};
pub use merge::{merge, merge_layers, merged};
pub use node::{
    EXPAND_TAG, INCLUDE_TAG, Node, NodeKind, NodeValue, ORDERED_DICT_TAG, expect_map,
    expect_scalar, expect_sequence, expect_sequence_of_len,
};
pub use preprocess::{
    Preprocessor, Variables, expand_variables, preprocess_file, preprocess_with_directory,
    preprocess_with_file_path,
};
pub use result_ext::ParamResultExt;
