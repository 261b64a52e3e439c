//! Shape guards shared by every converter.
//!
//! These are the single source of "wrong node kind" diagnostics; higher-level
//! converters call them instead of matching on [`NodeKind`] themselves.

use crate::error::{TraceError, TraceResult};

use super::{Node, NodeKind};

fn expect_kind(node: &Node, expected: NodeKind) -> TraceResult<()> {
    if node.kind() == expected {
        Ok(())
    } else {
        Err(TraceError::new(format!(
            "unexpected node type, expected {expected}, got {}",
            node.kind()
        )))
    }
}

/// Require `node` to be a map.
///
/// # Errors
///
/// Returns a [`TraceError`] naming the actual node kind otherwise.
pub fn expect_map(node: &Node) -> TraceResult<()> {
    expect_kind(node, NodeKind::Map)
}

/// Require `node` to be a sequence.
///
/// # Errors
///
/// Returns a [`TraceError`] naming the actual node kind otherwise.
pub fn expect_sequence(node: &Node) -> TraceResult<()> {
    expect_kind(node, NodeKind::Sequence)
}

/// Require `node` to be a sequence of exactly `len` items.
///
/// A kind mismatch and a size mismatch produce different messages.
///
/// # Errors
///
/// Returns a [`TraceError`] when the kind or the length is wrong.
pub fn expect_sequence_of_len(node: &Node, len: usize) -> TraceResult<()> {
    expect_sequence(node)?;
    if node.len() == len {
        Ok(())
    } else {
        Err(TraceError::new(format!(
            "wrong sequence size, expected {len}, got {}",
            node.len()
        )))
    }
}

/// Require `node` to be a scalar.
///
/// # Errors
///
/// Returns a [`TraceError`] naming the actual node kind otherwise.
pub fn expect_scalar(node: &Node) -> TraceResult<()> {
    expect_kind(node, NodeKind::Scalar)
}
