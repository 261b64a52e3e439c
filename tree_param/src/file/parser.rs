//! YAML parser that builds [`Node`] trees from the `yaml-rust2` event stream.

use std::collections::HashMap;
use std::sync::Arc;

use camino::Utf8Path;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use crate::error::{ParamError, ParamResult};
use crate::node::Node;

const INLINE_PATH: &str = "<inline>";
const CORE_SCHEMA_PREFIX: &str = "tag:yaml.org,2002:";
const CORE_NULL_TAG: &str = "!!null";

/// Parse the first YAML document in `content`.
///
/// Local tags are kept on the nodes they decorate. Untagged plain scalars
/// spelled `~`, `null`, `Null`, `NULL` or left empty become null nodes; every
/// other scalar keeps its text. Aliases are resolved by copying the anchored
/// node. An empty stream parses as null.
///
/// # Errors
///
/// Returns [`ParamError::Yaml`] with the path `<inline>` when the text is not
/// valid YAML.
///
/// # Examples
///
/// ```
/// use tree_param::{INCLUDE_TAG, parse_str};
///
/// let node = parse_str("base: !include common.yaml\nextra: ~\n")?;
/// assert!(node.get("base").is_some_and(|n| n.has_tag(INCLUDE_TAG)));
/// assert!(node.get("extra").is_some_and(tree_param::Node::is_null));
/// # Ok::<_, std::sync::Arc<tree_param::ParamError>>(())
/// ```
pub fn parse_str(content: &str) -> ParamResult<Node> {
    parse_str_at(Utf8Path::new(INLINE_PATH), content)
}

/// Parse `content`, attributing scanner errors to `path`.
///
/// # Errors
///
/// Returns [`ParamError::Yaml`] when the text is not valid YAML.
pub fn parse_str_at(path: &Utf8Path, content: &str) -> ParamResult<Node> {
    let mut parser = Parser::new_from_str(content);
    let mut builder = TreeBuilder::default();
    parser
        .load(&mut builder, false)
        .map_err(|err| Arc::new(ParamError::yaml(path, err)))?;
    Ok(builder.finish())
}

/// Receives parser events and assembles the tree bottom-up.
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    anchors: HashMap<usize, Node>,
    root: Option<Node>,
}

/// A container still waiting for its end event.
enum Frame {
    Sequence {
        anchor: usize,
        node: Node,
    },
    Mapping {
        anchor: usize,
        node: Node,
        key: Option<Node>,
    },
}

impl TreeBuilder {
    fn finish(self) -> Node {
        self.root.unwrap_or_default()
    }

    fn remember(&mut self, anchor: usize, node: &Node) {
        if anchor != 0 {
            self.anchors.insert(anchor, node.clone());
        }
    }

    fn push_complete(&mut self, node: Node) {
        match self.stack.last_mut() {
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
            Some(Frame::Sequence { node: parent, .. }) => parent.push(node),
            Some(Frame::Mapping {
                node: parent, key, ..
            }) => match key.take() {
                None => *key = Some(node),
                Some(done) => {
                    if let Some(entries) = parent.as_map_mut() {
                        entries.push((done, node));
                    }
                }
            },
        }
    }

    fn close(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let (anchor, node) = match frame {
            Frame::Sequence { anchor, node } => (anchor, node),
            Frame::Mapping {
                anchor,
                mut node,
                key,
            } => {
                // A trailing key without a value maps to null.
                if let (Some(done), Some(entries)) = (key, node.as_map_mut()) {
                    entries.push((done, Node::null()));
                }
                (anchor, node)
            }
        };
        self.remember(anchor, &node);
        self.push_complete(node);
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event, _marker: Marker) {
        match ev {
            Event::Nothing
            | Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart
            | Event::DocumentEnd => {}
            Event::Scalar(text, style, anchor, tag) => {
                let node = scalar_node(text, style, render_tag(tag.as_ref()));
                self.remember(anchor, &node);
                self.push_complete(node);
            }
            Event::SequenceStart(anchor, tag) => self.stack.push(Frame::Sequence {
                anchor,
                node: tagged(Node::sequence([]), render_tag(tag.as_ref())),
            }),
            Event::MappingStart(anchor, tag) => self.stack.push(Frame::Mapping {
                anchor,
                node: tagged(Node::map([]), render_tag(tag.as_ref())),
                key: None,
            }),
            Event::SequenceEnd | Event::MappingEnd => self.close(),
            Event::Alias(anchor) => {
                let node = self.anchors.get(&anchor).cloned().unwrap_or_default();
                self.push_complete(node);
            }
        }
    }
}

fn tagged(mut node: Node, tag: Option<String>) -> Node {
    if let Some(name) = tag {
        node.set_tag(name);
    }
    node
}

fn scalar_node(text: String, style: TScalarStyle, tag: Option<String>) -> Node {
    let plain_null = tag.is_none()
        && matches!(style, TScalarStyle::Plain)
        && matches!(text.as_str(), "" | "~" | "null" | "Null" | "NULL");
    if plain_null || tag.as_deref() == Some(CORE_NULL_TAG) {
        Node::null()
    } else {
        tagged(Node::scalar(text), tag)
    }
}

/// Render a parsed tag back to its source spelling, e.g. `!include` or `!!str`.
fn render_tag(parsed: Option<&Tag>) -> Option<String> {
    let tag = parsed?;
    let rendered = if tag.handle == "!" {
        format!("!{}", tag.suffix)
    } else if tag.handle == "!!" || tag.handle == CORE_SCHEMA_PREFIX {
        format!("!!{}", tag.suffix)
    } else {
        format!("{}{}", tag.handle, tag.suffix)
    };
    Some(rendered)
}
