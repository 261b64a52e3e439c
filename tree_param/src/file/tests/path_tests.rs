//! Tests for lexical path normalisation.

use camino::Utf8Path;
use rstest::rstest;

use super::super::{join_normalised, normalise};

#[rstest]
#[case("a/b/c.yaml", "a/b/c.yaml")]
#[case("./a/./b.yaml", "a/b.yaml")]
#[case("a/b/../c.yaml", "a/c.yaml")]
#[case("../x.yaml", "../x.yaml")]
#[case("a/../../x.yaml", "../x.yaml")]
#[case("/a/../../x.yaml", "/x.yaml")]
#[case(".", ".")]
#[case("a/..", ".")]
fn normalises_lexically(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalise(Utf8Path::new(input)), expected);
}

#[rstest]
#[case(".", "base.yaml", "base.yaml")]
#[case("conf", "../shared/base.yaml", "shared/base.yaml")]
#[case("conf/sub", "/etc/base.yaml", "/etc/base.yaml")]
#[case("", "base.yaml", "base.yaml")]
fn joins_relative_to_directory(#[case] dir: &str, #[case] target: &str, #[case] expected: &str) {
    assert_eq!(
        join_normalised(Utf8Path::new(dir), Utf8Path::new(target)),
        expected
    );
}
