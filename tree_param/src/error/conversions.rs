//! Conversions from collaborator error types into `ParamError`.

use std::sync::Arc;

use super::{ParamError, TraceError};

impl From<TraceError> for Arc<ParamError> {
    fn from(err: TraceError) -> Self {
        Self::new(ParamError::Decode(err))
    }
}

impl From<yaml_rust2::EmitError> for ParamError {
    fn from(err: yaml_rust2::EmitError) -> Self {
        Self::Emit(err.to_string())
    }
}
