//! Lexical path handling for include resolution.
//!
//! Paths are never canonicalised against the filesystem: `..` and `.` are
//! folded textually so that `$DIR` stays relative when the entry document was
//! given relatively, and so that in-memory sources resolve the same way disk
//! sources do.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Fold `.` and `..` components of `path` without touching the filesystem.
///
/// A `..` that would climb above a relative start is kept; one that would
/// climb above the root is dropped. An empty result becomes `.`.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use tree_param::normalise;
///
/// assert_eq!(normalise(Utf8Path::new("conf/./sub/../base.yaml")), "conf/base.yaml");
/// assert_eq!(normalise(Utf8Path::new("../shared/x.yaml")), "../shared/x.yaml");
/// assert_eq!(normalise(Utf8Path::new("a/..")), ".");
/// ```
#[must_use]
pub fn normalise(path: &Utf8Path) -> Utf8PathBuf {
    let mut parts: Vec<Utf8Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match parts.last() {
                Some(Utf8Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Utf8Component::RootDir | Utf8Component::Prefix(_)) => {}
                Some(Utf8Component::ParentDir | Utf8Component::CurDir) | None => {
                    parts.push(component);
                }
            },
            Utf8Component::Prefix(_) | Utf8Component::RootDir | Utf8Component::Normal(_) => {
                parts.push(component);
            }
        }
    }
    if parts.is_empty() {
        return Utf8PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Resolve `target` against `dir` and normalise the result.
///
/// Absolute targets ignore `dir`.
#[must_use]
pub fn join_normalised(dir: &Utf8Path, target: &Utf8Path) -> Utf8PathBuf {
    if target.is_absolute() {
        normalise(target)
    } else {
        normalise(&dir.join(target))
    }
}
