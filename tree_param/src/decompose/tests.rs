//! Tests for decomposition-driven conversion.

use rstest::rstest;

use super::{Decompose, Decomposition, MemberDescriptor, encode_decomposed, parse_decomposed};
use crate::codec::{FromNode, encode, parse};
use crate::error::TraceKey;
use crate::node::{Node, NodeKind};

#[derive(Debug, Default, PartialEq)]
struct Struct {
    a: i32,
    b: bool,
    c: String,
}

crate::decompose_struct!(Struct {
    required a: i32 = "an integer",
    required b: bool = "a flag",
    required c: String = "some text",
});

#[derive(Debug, Default, PartialEq)]
struct Outer {
    inner: Struct,
    list: Vec<Struct>,
    note: Option<String>,
}

crate::decompose_struct!(Outer {
    required inner: Struct = "nested struct",
    optional list: Vec<Struct> = "more structs",
    optional note: Option<String> = "free text",
});

/// Aggregate with private state, exposed through accessor functions.
#[derive(Debug, Default, PartialEq)]
struct Class {
    radius: f64,
}

impl Class {
    fn radius(&self) -> f64 {
        self.radius
    }

    fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }
}

impl Decompose for Class {
    fn decomposition() -> &'static Decomposition<Self> {
        static DECOMPOSITION: std::sync::OnceLock<Decomposition<Class>> =
            std::sync::OnceLock::new();
        DECOMPOSITION.get_or_init(|| {
            Decomposition::new(vec![MemberDescriptor::projection(
                "radius",
                "number",
                "circle radius",
                true,
                Self::radius,
                Self::set_radius,
            )])
        })
    }
}

crate::node_codec_via_decomposition!(Class);

fn sample() -> Node {
    Node::string_map([
        ("a", Node::scalar("1")),
        ("b", Node::scalar("true")),
        ("c", Node::scalar("x")),
    ])
}

#[rstest]
fn parses_all_members() {
    let parsed: Struct = parse(&sample()).expect("valid struct");
    assert_eq!(
        parsed,
        Struct {
            a: 1,
            b: true,
            c: "x".into()
        }
    );
}

#[rstest]
fn encodes_members_in_declaration_order() {
    let value = Struct {
        a: 1,
        b: true,
        c: "x".into(),
    };
    assert_eq!(encode(&value), sample());
    assert_eq!(encode_decomposed(&value), sample());
}

#[rstest]
fn key_order_in_input_does_not_matter() {
    let node = Node::string_map([
        ("c", Node::scalar("x")),
        ("a", Node::scalar("1")),
        ("b", Node::scalar("true")),
    ]);
    assert_eq!(parse_decomposed::<Struct>(&node), parse(&sample()));
}

#[rstest]
fn rejects_unknown_property() {
    let mut node = sample();
    node.insert("d", Node::scalar("4"));
    let err = parse::<Struct>(&node).expect_err("unknown key");
    assert_eq!(err.to_string(), "unknown property `d'");
}

#[rstest]
#[case(Node::sequence([Node::scalar("a")]), "unknown property `<sequence>'")]
#[case(Node::string_map([("a", Node::scalar("1"))]), "unknown property `<map>'")]
#[case(Node::null(), "unknown property `<null>'")]
fn non_scalar_keys_are_named_by_kind(#[case] key: Node, #[case] message: &str) {
    let node = Node::map([(key, Node::scalar("1"))]);
    let err = parse::<Struct>(&node).expect_err("non-scalar key");
    assert_eq!(err.to_string(), message);
}

#[rstest]
#[case("a")]
#[case("c")]
fn rejects_missing_required_property(#[case] missing: &str) {
    let entries = sample()
        .as_map()
        .unwrap_or_default()
        .iter()
        .filter(|(key, _)| key.as_scalar() != Some(missing))
        .cloned()
        .collect::<Vec<_>>();
    let err = parse::<Struct>(&Node::map(entries)).expect_err("missing key");
    assert_eq!(err.to_string(), format!("missing property `{missing}'"));
}

#[rstest]
fn member_failure_is_traced_by_name() {
    let mut node = sample();
    node.insert("a", Node::scalar("x"));
    let err = parse::<Struct>(&node).expect_err("bad integer");
    assert_eq!(err.to_string(), "a: invalid integer value: x");
    let entry = err.trace().first().expect("one trace entry");
    assert_eq!(entry.key, TraceKey::Field("a".into()));
    assert_eq!(entry.declared_type, "i32");
    assert_eq!(entry.node_kind, NodeKind::Scalar);
}

#[rstest]
fn requires_map_node() {
    let err = parse::<Struct>(&Node::sequence([])).expect_err("not a map");
    assert_eq!(
        err.to_string(),
        "unexpected node type, expected map, got sequence"
    );
}

#[rstest]
fn nested_failure_reports_full_path() {
    let mut broken = sample();
    broken.insert("b", Node::scalar("perhaps"));
    let node = Node::string_map([
        ("inner", sample()),
        ("list", Node::sequence([sample(), broken])),
    ]);
    let err = parse::<Outer>(&node).expect_err("bad boolean");
    assert_eq!(err.to_string(), "list[1].b: invalid boolean value: perhaps");
}

#[rstest]
fn optional_members_keep_defaults() {
    let node = Node::string_map([("inner", sample())]);
    let parsed: Outer = parse(&node).expect("valid outer");
    assert!(parsed.list.is_empty());
    assert_eq!(parsed.note, None);
}

#[rstest]
fn optional_members_are_still_emitted() {
    let encoded = encode(&Outer::default());
    let keys: Vec<_> = encoded
        .as_map()
        .unwrap_or_default()
        .iter()
        .filter_map(|(key, _)| key.as_scalar())
        .collect();
    assert_eq!(keys, ["inner", "list", "note"]);
    assert_eq!(encoded.get("note"), Some(&Node::null()));
}

#[rstest]
fn projection_members_round_trip() {
    let node = Node::string_map([("radius", Node::scalar("2.5"))]);
    let parsed: Class = parse(&node).expect("valid class");
    assert_eq!(parsed.radius().to_string(), "2.5");
    assert_eq!(encode(&parsed), node);
}

#[rstest]
fn decomposed_type_label_is_the_type_name() {
    assert_eq!(Struct::type_label(), "Struct");
    assert_eq!(Class::type_label(), "Class");
}

#[rstest]
fn describe_lists_member_metadata() {
    let schema = Struct::decomposition().describe();
    let a = schema.get("a").expect("member a");
    assert_eq!(a.get("type").and_then(Node::as_scalar), Some("i32"));
    assert_eq!(
        a.get("description").and_then(Node::as_scalar),
        Some("an integer")
    );
    assert_eq!(a.get("required").and_then(Node::as_scalar), Some("true"));
    assert_eq!(schema.len(), 3);
}

#[rstest]
fn decode_into_updates_existing_value() {
    let mut value = Outer {
        note: Some("keep".into()),
        ..Outer::default()
    };
    let node = Node::string_map([("inner", sample())]);
    Outer::decomposition()
        .decode_into(&node, &mut value)
        .expect("valid outer");
    assert_eq!(value.note.as_deref(), Some("keep"));
    assert_eq!(value.inner.c, "x");
}

#[rstest]
fn members_expose_info() {
    let names: Vec<_> = Outer::decomposition()
        .members()
        .iter()
        .map(|member| (member.info().name.as_str(), member.info().required))
        .collect();
    assert_eq!(names, [("inner", true), ("list", false), ("note", false)]);
}
