//! Reading, writing and locating YAML documents.
//!
//! Parsing goes through the `yaml-rust2` event stream so that local tags such
//! as `!include` survive into the [`Node`](crate::Node) tree. Documents are
//! read through a [`DocumentSource`]; [`FsSource`] reads from disk via
//! `cap-std` and [`MemorySource`] serves documents from memory.

mod emit;
mod parser;
mod path;
mod source;

pub use emit::to_yaml_string;
pub use parser::{parse_str, parse_str_at};
pub use path::{join_normalised, normalise};
pub use source::{DocumentSource, FsSource, MemorySource, read_file};


#[cfg(test)]
mod tests;
