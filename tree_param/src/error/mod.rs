//! Error types produced while decoding, preprocessing and merging trees.

mod constructors;
mod conversions;
mod trace;
mod types;

pub use trace::{TraceEntry, TraceError, TraceKey, TraceResult};
pub use types::ParamError;

/// Result alias used by the loading, preprocessing and merge layers.
///
/// Errors are shared so callers can fan them out to several reporters.
pub type ParamResult<T> = Result<T, std::sync::Arc<ParamError>>;
