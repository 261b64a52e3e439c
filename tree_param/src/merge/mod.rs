//! Overlaying one document tree onto another.
//!
//! Later layers win. Maps merge key by key, recursively. Plain sequences and
//! scalars are replaced wholesale. Sequences tagged `!ordered_dict` are
//! treated as ordered dictionaries: lists of single-key maps that are patched
//! by key while keeping their order.

mod ordered;

use crate::error::ParamResult;
use crate::node::{Node, NodeValue, ORDERED_DICT_TAG};

use ordered::merge_ordered_dict;

/// Merge `layer` into `target`, with `layer` taking precedence.
///
/// - A null `layer` leaves `target` untouched.
/// - A null `target` becomes `layer`.
/// - Two maps merge entry by entry: nested maps recurse, an existing
///   `!ordered_dict` value patched with a sequence uses the ordered
///   dictionary merge, and anything else overwrites the existing value.
/// - A `!ordered_dict` target merged with a sequence uses the ordered
///   dictionary merge.
/// - Otherwise `target` is replaced by `layer`.
///
/// # Errors
///
/// Returns [`ParamError::OrderedDictionary`](crate::ParamError::OrderedDictionary)
/// when an ordered dictionary merge meets an entry that is not a single-key
/// map. `target` may be partially merged in that case.
///
/// # Examples
///
/// ```
/// use tree_param::{merge, parse_str};
///
/// let mut a = parse_str("{name: aap, list: [1, 2, 3]}")?;
/// let b = parse_str("{list: [5], movie: book}")?;
/// merge(&mut a, b)?;
/// assert_eq!(a, parse_str("{name: aap, list: [5], movie: book}")?);
/// # Ok::<_, std::sync::Arc<tree_param::ParamError>>(())
/// ```
pub fn merge(target: &mut Node, layer: Node) -> ParamResult<()> {
    if layer.is_null() {
        return Ok(());
    }
    if target.is_null() {
        *target = layer;
        return Ok(());
    }
    merge_value(target, layer)
}

/// By-value variant of [`merge`].
///
/// # Errors
///
/// See [`merge`].
pub fn merged(mut target: Node, layer: Node) -> ParamResult<Node> {
    merge(&mut target, layer)?;
    Ok(target)
}

/// Fold `layers` from first to last, starting from null.
///
/// The first layer holds defaults; every following layer overrides it.
///
/// # Errors
///
/// See [`merge`].
pub fn merge_layers(layers: impl IntoIterator<Item = Node>) -> ParamResult<Node> {
    let mut result = Node::null();
    for (index, layer) in layers.into_iter().enumerate() {
        tracing::trace!(layer = index, kind = %layer.kind(), "merging layer");
        merge(&mut result, layer)?;
    }
    Ok(result)
}

/// Merge below the top level, where a null layer value overwrites.
fn merge_value(target: &mut Node, layer: Node) -> ParamResult<()> {
    if target.is_map() && layer.is_map() {
        return merge_map(target, layer);
    }
    if is_ordered_dict(target) && layer.is_sequence() {
        return merge_ordered_dict(target, layer);
    }
    *target = layer;
    Ok(())
}

fn merge_map(target: &mut Node, layer: Node) -> ParamResult<()> {
    let NodeValue::Map(additions) = layer.into_value() else {
        return Ok(());
    };
    let Some(entries) = target.as_map_mut() else {
        return Ok(());
    };
    for (key, value) in additions {
        match entries.iter().position(|(existing, _)| same_key(existing, &key)) {
            Some(index) => {
                if let Some((_, current)) = entries.get_mut(index) {
                    merge_value(current, value)?;
                }
            }
            None => entries.push((key, value)),
        }
    }
    Ok(())
}

fn is_ordered_dict(node: &Node) -> bool {
    node.is_sequence() && node.has_tag(ORDERED_DICT_TAG)
}

/// Keys match on content; tags on keys are ignored.
fn same_key(a: &Node, b: &Node) -> bool {
    a.value() == b.value()
}
