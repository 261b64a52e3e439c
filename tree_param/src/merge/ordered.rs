//! Ordered dictionary merge.

use std::sync::Arc;

use crate::error::{ParamError, ParamResult};
use crate::node::{Node, NodeValue};

use super::{merge_map, same_key};

/// The key of a single-entry map, or `None` for anything else.
fn single_key(node: &Node) -> Option<&Node> {
    match node.as_map()? {
        [(key, _)] => Some(key),
        _ => None,
    }
}

fn validate(node: &Node) -> ParamResult<()> {
    for (index, item) in node.as_sequence().unwrap_or_default().iter().enumerate() {
        if single_key(item).is_none() {
            let found = item.as_map().map_or_else(
                || item.kind().to_string(),
                |entries| format!("map with {} entries", entries.len()),
            );
            return Err(Arc::new(ParamError::OrderedDictionary { index, found }));
        }
    }
    Ok(())
}

/// Patch the ordered dictionary `target` with the entries of `layer`.
///
/// Each entry of `layer` merges into the first not yet matched entry of
/// `target` with the same key, in place. Entries without a match are appended.
pub(super) fn merge_ordered_dict(target: &mut Node, layer: Node) -> ParamResult<()> {
    validate(target)?;
    validate(&layer)?;
    let NodeValue::Sequence(additions) = layer.into_value() else {
        return Ok(());
    };
    let Some(items) = target.as_sequence_mut() else {
        return Ok(());
    };

    tracing::trace!(
        existing = items.len(),
        additions = additions.len(),
        "merging ordered dictionary"
    );
    let mut consumed = vec![false; items.len()];
    for addition in additions {
        let found = single_key(&addition).and_then(|key| {
            items
                .iter()
                .zip(&consumed)
                .position(|(item, used)| !used && single_key(item).is_some_and(|k| same_key(k, key)))
        });
        match found {
            Some(index) => {
                if let Some(item) = items.get_mut(index) {
                    merge_map(item, addition)?;
                }
                if let Some(used) = consumed.get_mut(index) {
                    *used = true;
                }
            }
            None => {
                items.push(addition);
                consumed.push(true);
            }
        }
    }
    Ok(())
}
