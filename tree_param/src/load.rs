//! One-call entry points: read, preprocess, merge and decode.

use camino::Utf8Path;

use crate::codec::{FromNode, parse};
use crate::error::ParamResult;
use crate::merge::merge_layers;
use crate::preprocess::{Preprocessor, Variables};
use crate::result_ext::ParamResultExt;

/// Read `path`, resolve its directives and decode it as `T`.
///
/// # Errors
///
/// Returns the first read, parse, directive or decode failure.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use tree_param::{Variables, load};
///
/// let ports: Vec<u16> = load(Utf8Path::new("ports.yaml"), Variables::new())?;
/// # Ok::<_, std::sync::Arc<tree_param::ParamError>>(())
/// ```
pub fn load<T: FromNode>(path: &Utf8Path, variables: Variables) -> ParamResult<T> {
    let node = Preprocessor::new().variables(variables).process_file(path)?;
    parse(&node).into_param()
}

/// Preprocess each of `paths`, merge them in order and decode the result.
///
/// Earlier files provide defaults that later files override.
///
/// # Errors
///
/// Returns the first read, parse, directive, merge or decode failure.
pub fn load_layered<T, P>(paths: impl IntoIterator<Item = P>, variables: Variables) -> ParamResult<T>
where
    T: FromNode,
    P: AsRef<Utf8Path>,
{
    let preprocessor = Preprocessor::new().variables(variables);
    let layers = paths
        .into_iter()
        .map(|path| preprocessor.process_file(path.as_ref()))
        .collect::<ParamResult<Vec<_>>>()?;
    let node = merge_layers(layers)?;
    tracing::debug!(kind = %node.kind(), "decoding merged layers");
    parse(&node).into_param()
}
