//! Extensions for mapping errors to `ParamResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(e.into()))`
//! patterns when converting collaborator error types, such as
//! [`TraceError`](crate::TraceError) or `yaml_rust2::EmitError`, into the
//! crate's `ParamResult<T>` alias (`Result<T, Arc<ParamError>>`).
//!
//! # Examples
//!
//! ```
//! use tree_param::{Node, ParamResult, ParamResultExt, parse};
//!
//! fn port(node: &Node) -> ParamResult<u16> {
//!     parse::<u16>(node).into_param()
//! }
//!
//! assert!(port(&Node::scalar("70000")).is_err());
//! ```

use std::sync::Arc;

use crate::{ParamError, ParamResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<ParamError>`
/// into a `ParamResult<T>`.
pub trait ParamResultExt<T> {
    /// Convert `Result<T, E>` into `ParamResult<T>` using `Into<ParamError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<ParamError>`.
    fn into_param(self) -> ParamResult<T>;
}

impl<T, E> ParamResultExt<T> for Result<T, E>
where
    E: Into<ParamError>,
{
    fn into_param(self) -> ParamResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
