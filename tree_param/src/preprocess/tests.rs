//! Unit tests for directive resolution against in-memory documents.

use anyhow::{Context, Result, anyhow, ensure};
use camino::Utf8Path;
use rstest::rstest;

use super::context::{PathContext, Work};
use super::{Preprocessor, Variables, expand_variables};
use crate::error::{ParamError, ParamResult};
use crate::file::{MemorySource, parse_str};
use crate::node::{Node, NodeKind};

fn to_anyhow<T>(result: ParamResult<T>) -> Result<T> {
    result.map_err(|err| anyhow!(err.to_string()))
}

fn vars(pairs: &[(&str, &str)]) -> Variables {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
        .collect()
}

fn expand_as_file(text: &str, file: &str, variables: Variables) -> ParamResult<Node> {
    let mut node = parse_str(text)?;
    Preprocessor::new()
        .with_source(MemorySource::new())
        .variables(variables)
        .process_with_file_path(&mut node, Utf8Path::new(file))?;
    Ok(node)
}

fn expand_in_dir(text: &str, dir: &str) -> ParamResult<Node> {
    let mut node = parse_str(text)?;
    Preprocessor::new()
        .with_source(MemorySource::new())
        .process_with_directory(&mut node, Utf8Path::new(dir))?;
    Ok(node)
}

fn thing(node: &Node) -> Option<&str> {
    node.get("thing").and_then(Node::as_scalar)
}

#[rstest]
#[case("thing: !expand $test", "aap", "aap")]
#[case("thing: !expand $test/noot", "aap", "aap/noot")]
#[case("thing: !expand aap/$test/mies", "noot", "aap/noot/mies")]
#[case("thing: !expand ${test}", "aap", "aap")]
#[case("thing: !expand ${test}noot", "aap", "aapnoot")]
#[case("thing: !expand aap${test}mies", "noot", "aapnootmies")]
fn expands_variables(#[case] text: &str, #[case] value: &str, #[case] expected: &str) -> Result<()> {
    let node = to_anyhow(expand_as_file(text, "/example/location", vars(&[("test", value)])))?;
    ensure!(thing(&node) == Some(expected), "got {:?}", thing(&node));
    ensure!(node.get("thing").and_then(Node::tag).is_none(), "tag left behind");
    Ok(())
}

#[rstest]
fn dir_is_parent_of_file() -> Result<()> {
    let node = to_anyhow(expand_as_file("thing: !expand $DIR", "/example/location", Variables::new()))?;
    ensure!(thing(&node) == Some("/example"));
    Ok(())
}

#[rstest]
fn dir_is_given_directory() -> Result<()> {
    let node = to_anyhow(expand_in_dir("thing: !expand $DIR", "/example/location/"))?;
    ensure!(thing(&node) == Some("/example/location/"));
    Ok(())
}

#[rstest]
fn empty_dir_expands_to_dot() -> Result<()> {
    let node = to_anyhow(expand_as_file(
        "thing: !expand $DIR/other.yaml",
        "file.yaml",
        Variables::new(),
    ))?;
    ensure!(thing(&node) == Some("./other.yaml"));

    let from_dir = to_anyhow(expand_in_dir("thing: !expand $DIR/other.yaml", ""))?;
    ensure!(thing(&from_dir) == Some("./other.yaml"));
    Ok(())
}

#[rstest]
fn file_is_the_given_path() -> Result<()> {
    let node = to_anyhow(expand_as_file(
        "thing: !expand $FILE",
        "path/file.yaml",
        Variables::new(),
    ))?;
    ensure!(thing(&node) == Some("path/file.yaml"));
    Ok(())
}

#[rstest]
fn file_is_undefined_in_directory_context() {
    let err = expand_in_dir("thing: !expand $FILE", "").expect_err("FILE is unset");
    assert!(matches!(
        err.as_ref(),
        ParamError::UndefinedVariable { name, .. } if name == "FILE"
    ));
}

#[rstest]
fn ambient_variables_shadow_caller_variables() -> Result<()> {
    let node = to_anyhow(expand_as_file(
        "thing: !expand $DIR",
        "conf/app.yaml",
        vars(&[("DIR", "/elsewhere")]),
    ))?;
    ensure!(thing(&node) == Some("conf"));
    Ok(())
}

#[rstest]
fn undefined_variable_is_an_error() {
    let err = expand_as_file("thing: !expand $missing", "a.yaml", Variables::new())
        .expect_err("variable is undefined");
    assert_eq!(
        err.to_string(),
        "undefined variable `missing' in '$missing'"
    );
}

#[rstest]
#[case("${open", "unterminated `${`")]
#[case("${}", "empty variable name")]
fn malformed_templates_are_rejected(#[case] template: &str, #[case] message: &str) {
    let err = expand_variables(template, &Variables::new()).expect_err("malformed");
    assert!(matches!(
        err.as_ref(),
        ParamError::MalformedTemplate { message: m, .. } if m == message
    ));
}

#[rstest]
#[case("cost: $", "cost: $")]
#[case("$-", "$-")]
#[case("plain", "plain")]
#[case("$a$a", "xx")]
#[case("${a}_$a.b", "x_x.b")]
fn expansion_edge_cases(#[case] template: &str, #[case] expected: &str) -> Result<()> {
    let expanded = to_anyhow(expand_variables(template, &vars(&[("a", "x")])))?;
    ensure!(expanded == expected, "got {expanded:?}");
    Ok(())
}

#[rstest]
#[case("thing: !expand [a]", "!expand needs a string, got sequence")]
#[case("thing: !include {a: 1}", "!include needs a string, got map")]
fn directives_require_scalars(#[case] text: &str, #[case] message: &str) {
    let err = expand_as_file(text, "a.yaml", Variables::new()).expect_err("bad payload");
    assert_eq!(err.to_string(), message);
}

fn source() -> MemorySource {
    MemorySource::new()
        .with_document("data/include.yaml", "b: !include child.yaml\n")
        .with_document("data/child.yaml", "foo: bar\n")
        .with_document("data/recursive_include.yaml", "a: !include include.yaml\n")
}

#[rstest]
fn includes_document() -> Result<()> {
    let node = to_anyhow(
        Preprocessor::new()
            .with_source(source())
            .process_file(Utf8Path::new("data/include.yaml")),
    )?;
    ensure!(
        node == Node::string_map([("b", Node::string_map([("foo", Node::scalar("bar"))]))]),
        "got {node:?}"
    );
    Ok(())
}

#[rstest]
fn includes_recursively() -> Result<()> {
    let node = to_anyhow(
        Preprocessor::new()
            .with_source(source())
            .process_file(Utf8Path::new("data/recursive_include.yaml")),
    )?;
    let foo = node
        .get("a")
        .and_then(|a| a.get("b"))
        .and_then(|b| b.get("foo"))
        .context("a.b.foo")?;
    ensure!(foo.as_scalar() == Some("bar"));
    Ok(())
}

#[rstest]
fn included_documents_use_their_own_context() -> Result<()> {
    let source = MemorySource::new()
        .with_document("root.yaml", "sub: !include nested/inner.yaml\nhere: !expand $FILE\n")
        .with_document(
            "nested/inner.yaml",
            "dir: !expand $DIR\nfile: !expand $FILE\nsibling: !include ../leaf.yaml\n",
        )
        .with_document("leaf.yaml", "where: !expand $DIR\n");
    let node = to_anyhow(
        Preprocessor::new()
            .with_source(source)
            .process_file(Utf8Path::new("root.yaml")),
    )?;
    let sub = node.get("sub").context("sub")?;
    ensure!(sub.get("dir").and_then(Node::as_scalar) == Some("nested"));
    ensure!(sub.get("file").and_then(Node::as_scalar) == Some("nested/inner.yaml"));
    let sibling = sub.get("sibling").context("sibling")?;
    ensure!(sibling.get("where").and_then(Node::as_scalar) == Some("."));
    ensure!(node.get("here").and_then(Node::as_scalar) == Some("root.yaml"));
    Ok(())
}

#[rstest]
fn include_path_may_use_variables() -> Result<()> {
    let source = MemorySource::new()
        .with_document("main.yaml", "env: !include $STAGE/settings.yaml\n")
        .with_document("prod/settings.yaml", "debug: off\n");
    let node = to_anyhow(
        Preprocessor::new()
            .with_source(source)
            .variable("STAGE", "prod")
            .process_file(Utf8Path::new("main.yaml")),
    )?;
    let debug = node.get("env").and_then(|env| env.get("debug"));
    ensure!(debug.and_then(Node::as_scalar) == Some("off"));
    Ok(())
}

#[rstest]
fn included_root_can_be_a_sequence() -> Result<()> {
    let source = MemorySource::new()
        .with_document("main.yaml", "list: !include items.yaml\n")
        .with_document("items.yaml", "- !expand $DIR\n- plain\n");
    let node = to_anyhow(
        Preprocessor::new()
            .with_source(source)
            .process_file(Utf8Path::new("main.yaml")),
    )?;
    let list = node.get("list").context("list")?;
    ensure!(list.kind() == NodeKind::Sequence);
    ensure!(list.item(0).and_then(Node::as_scalar) == Some("."));
    Ok(())
}

#[rstest]
fn same_document_may_be_included_twice() -> Result<()> {
    let source = MemorySource::new()
        .with_document("main.yaml", "a: !include common.yaml\nb: !include common.yaml\n")
        .with_document("common.yaml", "x: 1\n");
    let node = to_anyhow(
        Preprocessor::new()
            .with_source(source)
            .process_file(Utf8Path::new("main.yaml")),
    )?;
    ensure!(node.get("a") == node.get("b"));
    ensure!(node.get("a").is_some_and(Node::is_map));
    Ok(())
}

#[rstest]
fn cyclic_include_is_reported() {
    let source = MemorySource::new()
        .with_document("a.yaml", "next: !include b.yaml\n")
        .with_document("b.yaml", "back: !include ./a.yaml\n");
    let err = Preprocessor::new()
        .with_source(source)
        .process_file(Utf8Path::new("a.yaml"))
        .expect_err("cycle");
    assert_eq!(
        err.to_string(),
        "cyclic include detected: a.yaml -> b.yaml -> a.yaml"
    );
}

#[rstest]
fn empty_include_path_is_rejected() {
    let err = expand_as_file("thing: !include $EMPTY", "a.yaml", vars(&[("EMPTY", "")]))
        .expect_err("empty include");
    assert!(matches!(err.as_ref(), ParamError::EmptyInclude { .. }));
}

#[rstest]
fn missing_include_surfaces_read_error() {
    let err = expand_as_file("thing: !include absent.yaml", "conf/a.yaml", Variables::new())
        .expect_err("missing include");
    assert!(matches!(
        err.as_ref(),
        ParamError::File { path, .. } if path == "conf/absent.yaml"
    ));
}

#[rstest]
fn untagged_documents_are_left_alone() -> Result<()> {
    let text = "a: $DIR\nb:\n  - 1\n  - c: ${x}\n";
    let original = to_anyhow(parse_str(text))?;
    let node = to_anyhow(expand_as_file(text, "a.yaml", Variables::new()))?;
    ensure!(node == original);
    Ok(())
}

#[rstest]
fn unresolvable_pending_path_is_an_error() -> Result<()> {
    let mut root = to_anyhow(parse_str("a: 1\n"))?;
    let mut work = Work::new(
        PathContext::for_directory(Utf8Path::new(".")),
        vec![vec![0], vec![4, 2]],
        Vec::new(),
    );
    let err = Preprocessor::new()
        .with_source(MemorySource::new())
        .drain(&mut root, &mut work, &Variables::new())
        .expect_err("dangling path");
    ensure!(
        matches!(err.as_ref(), ParamError::DanglingNode { path } if path == &[4, 2]),
        "got {err}"
    );
    ensure!(
        err.to_string() == "pending node at child path [4, 2] is missing from the document",
        "got {err}"
    );
    Ok(())
}
