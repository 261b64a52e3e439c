//! `serde` serialisation of document trees.
//!
//! Tags are not represented; scalars serialise as strings.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use super::{Node, NodeValue};

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value() {
            NodeValue::Null => serializer.serialize_unit(),
            NodeValue::Scalar(text) => serializer.serialize_str(text),
            NodeValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            NodeValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}
