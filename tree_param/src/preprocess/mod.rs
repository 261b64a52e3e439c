//! Resolution of `!include` and `!expand` directives.
//!
//! The preprocessor walks a tree with an explicit stack of work items. Each
//! item pairs a path context (directory and, when known, file) with the nodes
//! still to visit under that context. An include replaces the tagged node with
//! the loaded document and schedules it as a new item with the included
//! file's own context, so relative paths inside an included document resolve
//! against that document. The included subtree is drained before the
//! including item resumes.
//!
//! During a pass the variables `DIR` (the current directory, `.` when empty)
//! and `FILE` (the current file, absent in a bare directory context) are
//! available next to the caller's variables and take precedence over them.

mod context;
mod expand;

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{ParamError, ParamResult};
use crate::file::{DocumentSource, FsSource, join_normalised, normalise};
use crate::node::{EXPAND_TAG, INCLUDE_TAG, Node};

use context::{PathContext, Work};

pub use expand::expand_variables;

/// Caller-supplied variables for `$NAME` substitution.
pub type Variables = std::collections::BTreeMap<String, String>;

/// Builder and runner for preprocessing passes.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use tree_param::{MemorySource, Node, Preprocessor};
///
/// let source = MemorySource::new()
///     .with_document("conf/app.yaml", "db: !include db.yaml\nname: !expand $NAME")
///     .with_document("conf/db.yaml", "host: !expand $DIR/socket");
/// let node = Preprocessor::new()
///     .with_source(source)
///     .variable("NAME", "aap")
///     .process_file(Utf8Path::new("conf/app.yaml"))?;
///
/// assert_eq!(node.get("name").and_then(Node::as_scalar), Some("aap"));
/// let host = node.get("db").and_then(|db| db.get("host"));
/// assert_eq!(host.and_then(Node::as_scalar), Some("conf/socket"));
/// # Ok::<_, std::sync::Arc<tree_param::ParamError>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Preprocessor<S = FsSource> {
    source: S,
    variables: Variables,
}

impl Preprocessor<FsSource> {
    /// Create a preprocessor that reads includes from the filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: DocumentSource> Preprocessor<S> {
    /// Read included documents from `source` instead.
    #[must_use]
    pub fn with_source<T: DocumentSource>(self, source: T) -> Preprocessor<T> {
        Preprocessor {
            source,
            variables: self.variables,
        }
    }

    /// Add every entry of `variables`, replacing existing names.
    #[must_use]
    pub fn variables(mut self, variables: Variables) -> Self {
        self.variables.extend(variables);
        self
    }

    /// Add a single variable.
    #[must_use]
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Read `path` through the source and preprocess it as a file.
    ///
    /// # Errors
    ///
    /// Propagates read and parse failures of any document involved and every
    /// directive failure described on [`Preprocessor::process_with_file_path`].
    pub fn process_file(&self, path: &Utf8Path) -> ParamResult<Node> {
        let mut node = self.source.read_document(path)?;
        self.process_with_file_path(&mut node, path)?;
        Ok(node)
    }

    /// Preprocess `root` as though it was read from `file`.
    ///
    /// # Errors
    ///
    /// Fails on the first directive that cannot be resolved: a tag on a
    /// non-scalar, an undefined or malformed variable reference, an empty or
    /// cyclic include, or a document that cannot be read. No partial result
    /// is reported; `root` may be partially processed afterwards.
    pub fn process_with_file_path(&self, root: &mut Node, file: &Utf8Path) -> ParamResult<()> {
        self.run(
            root,
            PathContext::for_file(file),
            vec![normalise(file)],
        )
    }

    /// Preprocess `root` relative to `dir`, with no current file.
    ///
    /// `$FILE` is undefined for directives outside included documents.
    ///
    /// # Errors
    ///
    /// See [`Preprocessor::process_with_file_path`].
    pub fn process_with_directory(&self, root: &mut Node, dir: &Utf8Path) -> ParamResult<()> {
        self.run(root, PathContext::for_directory(dir), Vec::new())
    }

    fn run(&self, root: &mut Node, context: PathContext, chain: Vec<Utf8PathBuf>) -> ParamResult<()> {
        let mut variables = self.variables.clone();
        let mut work = vec![Work::new(context, vec![Vec::new()], chain)];

        while let Some(mut current) = work.pop() {
            current.context.apply(&mut variables);
            if let Some(included) = self.drain(root, &mut current, &variables)? {
                work.push(current);
                work.push(included);
            }
        }
        Ok(())
    }

    /// Visit pending nodes of `current` until it is exhausted or an include
    /// suspends it. Returns the work item for the included document.
    fn drain(
        &self,
        root: &mut Node,
        current: &mut Work,
        variables: &Variables,
    ) -> ParamResult<Option<Work>> {
        while let Some(path) = current.pending.pop() {
            let Some(node) = root.descend_mut(&path) else {
                return Err(Arc::new(ParamError::DanglingNode { path }));
            };
            if node.has_tag(INCLUDE_TAG) {
                let target = self.include(node, current, variables)?;
                let context = PathContext::for_file(&target);
                let mut chain = current.chain.clone();
                chain.push(target);
                return Ok(Some(Work::new(context, vec![path], chain)));
            }
            if node.has_tag(EXPAND_TAG) {
                expand_node(node, variables)?;
                continue;
            }
            let children = node.children().count();
            current.pending.extend((0..children).map(|index| {
                let mut child = path.clone();
                child.push(index);
                child
            }));
        }
        Ok(None)
    }

    /// Replace `node` with the document it names and return that document's path.
    fn include(&self, node: &mut Node, current: &Work, variables: &Variables) -> ParamResult<Utf8PathBuf> {
        let Some(template) = node.as_scalar() else {
            return Err(invalid_payload(INCLUDE_TAG, node));
        };
        let expanded = expand_variables(template, variables)?;
        if expanded.is_empty() {
            return Err(Arc::new(ParamError::EmptyInclude {
                template: template.to_owned(),
            }));
        }

        let target = join_normalised(&current.context.dir, Utf8Path::new(&expanded));
        if current.chain.contains(&target) {
            let cycle = current
                .chain
                .iter()
                .chain(std::iter::once(&target))
                .map(|path| path.as_str())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(Arc::new(ParamError::CyclicInclude { cycle }));
        }

        tracing::debug!(path = %target, depth = current.chain.len(), "including document");
        *node = self.source.read_document(&target)?;
        Ok(target)
    }
}

fn expand_node(node: &mut Node, variables: &Variables) -> ParamResult<()> {
    let Some(template) = node.as_scalar() else {
        return Err(invalid_payload(EXPAND_TAG, node));
    };
    let expanded = expand_variables(template, variables)?;
    *node = Node::scalar(expanded);
    Ok(())
}

fn invalid_payload(tag: &'static str, node: &Node) -> Arc<ParamError> {
    Arc::new(ParamError::InvalidTagPayload {
        tag,
        expected: "string",
        found: node.kind(),
    })
}

/// Read `path` from disk and resolve its directives.
///
/// # Errors
///
/// See [`Preprocessor::process_file`].
pub fn preprocess_file(path: &Utf8Path, variables: Variables) -> ParamResult<Node> {
    Preprocessor::new().variables(variables).process_file(path)
}

/// Resolve directives in `root` as though it was read from `file`.
///
/// # Errors
///
/// See [`Preprocessor::process_with_file_path`].
pub fn preprocess_with_file_path(
    root: &mut Node,
    file: &Utf8Path,
    variables: Variables,
) -> ParamResult<()> {
    Preprocessor::new()
        .variables(variables)
        .process_with_file_path(root, file)
}

/// Resolve directives in `root` relative to `dir`.
///
/// # Errors
///
/// See [`Preprocessor::process_with_directory`].
pub fn preprocess_with_directory(
    root: &mut Node,
    dir: &Utf8Path,
    variables: Variables,
) -> ParamResult<()> {
    Preprocessor::new()
        .variables(variables)
        .process_with_directory(root, dir)
}

#[cfg(test)]
mod tests;
