//! Tests for node construction, access and the shape guards.

use rstest::rstest;

use super::{
    EXPAND_TAG, INCLUDE_TAG, Node, NodeKind, NodeValue, expect_map, expect_scalar,
    expect_sequence, expect_sequence_of_len,
};

#[rstest]
#[case(Node::null(), NodeKind::Null)]
#[case(Node::scalar(""), NodeKind::Scalar)]
#[case(Node::sequence([]), NodeKind::Sequence)]
#[case(Node::map([]), NodeKind::Map)]
fn reports_kind(#[case] node: Node, #[case] expected: NodeKind) {
    assert_eq!(node.kind(), expected);
}

#[rstest]
fn default_is_untagged_null() {
    let node = Node::default();
    assert!(node.is_null());
    assert_eq!(node.tag(), None);
}

#[rstest]
fn empty_scalar_is_not_null() {
    let node = Node::scalar("");
    assert!(node.is_scalar());
    assert_eq!(node.as_scalar(), Some(""));
}

#[rstest]
fn tags_are_independent_of_value() {
    let mut node = Node::scalar("base.yaml").with_tag(INCLUDE_TAG);
    assert!(node.has_tag(INCLUDE_TAG));
    assert!(!node.has_tag(EXPAND_TAG));

    node.set_value(NodeValue::Null);
    assert!(node.has_tag(INCLUDE_TAG));

    assert_eq!(node.clear_tag().as_deref(), Some(INCLUDE_TAG));
    assert_eq!(node.tag(), None);
}

#[rstest]
fn insert_replaces_first_matching_entry() {
    let mut node = Node::string_map([("a", Node::scalar("1")), ("b", Node::scalar("2"))]);
    node.insert("a", Node::scalar("3"));
    node.insert("c", Node::scalar("4"));
    assert_eq!(
        node,
        Node::string_map([
            ("a", Node::scalar("3")),
            ("b", Node::scalar("2")),
            ("c", Node::scalar("4")),
        ])
    );
}

#[rstest]
fn insert_turns_null_into_map() {
    let mut node = Node::null();
    node.insert("key", Node::scalar("value"));
    assert!(node.is_map());
    assert_eq!(node.get("key"), Some(&Node::scalar("value")));
}

#[rstest]
fn push_turns_null_into_sequence() {
    let mut node = Node::null();
    node.push(Node::scalar("a"));
    node.push(Node::scalar("b"));
    assert_eq!(node.len(), 2);
    assert_eq!(node.item(1), Some(&Node::scalar("b")));
}

#[rstest]
fn get_ignores_non_scalar_keys() {
    let node = Node::map([
        (Node::sequence([]), Node::scalar("x")),
        (Node::scalar("k"), Node::scalar("y")),
    ]);
    assert_eq!(node.get("k"), Some(&Node::scalar("y")));
    assert_eq!(node.get("x"), None);
}

#[rstest]
fn children_skip_map_keys() {
    let node = Node::string_map([("a", Node::scalar("1")), ("b", Node::scalar("2"))]);
    let values: Vec<_> = node.children().filter_map(Node::as_scalar).collect();
    assert_eq!(values, ["1", "2"]);
    assert_eq!(Node::scalar("leaf").children().count(), 0);
}

#[rstest]
fn descend_follows_child_positions() {
    let mut node = Node::string_map([
        ("first", Node::scalar("skip")),
        (
            "second",
            Node::sequence([Node::scalar("zero"), Node::scalar("one")]),
        ),
    ]);
    let target = node.descend_mut(&[1, 1]).expect("path exists");
    *target = Node::scalar("changed");
    assert_eq!(
        node.get("second").and_then(|seq| seq.item(1)),
        Some(&Node::scalar("changed"))
    );
    assert!(node.descend_mut(&[0, 0]).is_none());
    assert!(node.descend_mut(&[]).is_some());
}

#[rstest]
fn clone_is_deep() {
    let original = Node::string_map([("list", Node::sequence([Node::scalar("1")]))]);
    let mut copy = original.clone();
    copy.get_mut("list")
        .expect("list present")
        .push(Node::scalar("2"));
    assert_eq!(original.get("list").map(Node::len), Some(1));
    assert_eq!(copy.get("list").map(Node::len), Some(2));
}

#[rstest]
fn guards_accept_matching_kinds() {
    assert!(expect_map(&Node::map([])).is_ok());
    assert!(expect_sequence(&Node::sequence([])).is_ok());
    assert!(expect_scalar(&Node::scalar("x")).is_ok());
    assert!(expect_sequence_of_len(&Node::sequence([Node::null()]), 1).is_ok());
}

#[rstest]
#[case(Node::scalar("x"), "unexpected node type, expected map, got scalar")]
#[case(Node::null(), "unexpected node type, expected map, got null")]
fn map_guard_names_actual_kind(#[case] node: Node, #[case] message: &str) {
    let err = expect_map(&node).expect_err("not a map");
    assert_eq!(err.message(), message);
}

#[rstest]
fn scalar_guard_rejects_null() {
    let err = expect_scalar(&Node::null()).expect_err("null is not a scalar");
    assert_eq!(
        err.message(),
        "unexpected node type, expected scalar, got null"
    );
}

#[rstest]
fn sized_guard_checks_length() {
    let node = Node::sequence([Node::null(), Node::null()]);
    let err = expect_sequence_of_len(&node, 3).expect_err("wrong length");
    assert_eq!(err.message(), "wrong sequence size, expected 3, got 2");
}

#[rstest]
fn serializes_without_tags() {
    let node = Node::string_map([
        ("name", Node::scalar("aap").with_tag(EXPAND_TAG)),
        ("items", Node::sequence([Node::scalar("1"), Node::null()])),
    ]);
    let json = serde_json::to_value(&node).expect("serializable");
    assert_eq!(
        json,
        serde_json::json!({ "name": "aap", "items": ["1", null] })
    );
}
