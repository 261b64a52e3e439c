//! Writing node trees back out as YAML text.

use yaml_rust2::yaml::Hash;
use yaml_rust2::{Yaml, YamlEmitter};

use crate::error::ParamResult;
use crate::node::{Node, NodeValue};
use crate::result_ext::ParamResultExt;

/// Render `node` as a YAML document.
///
/// Scalars are written as strings and quoted whenever they would otherwise
/// read back as another type, so parsing the output yields the same scalar
/// text. Tags are not written.
///
/// # Errors
///
/// Returns [`ParamError::Emit`](crate::ParamError::Emit) if the emitter rejects the tree.
pub fn to_yaml_string(node: &Node) -> ParamResult<String> {
    let mut out = String::new();
    {
        let mut emitter = YamlEmitter::new(&mut out);
        emitter.dump(&to_yaml(node)).into_param()?;
    }
    out.push('\n');
    Ok(out)
}

fn to_yaml(node: &Node) -> Yaml {
    match node.value() {
        NodeValue::Null => Yaml::Null,
        NodeValue::Scalar(text) => Yaml::String(text.clone()),
        NodeValue::Sequence(items) => Yaml::Array(items.iter().map(to_yaml).collect()),
        NodeValue::Map(entries) => {
            let mut hash = Hash::new();
            for (key, value) in entries {
                hash.insert(to_yaml(key), to_yaml(value));
            }
            Yaml::Hash(hash)
        }
    }
}
