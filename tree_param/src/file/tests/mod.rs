//! Tests for the YAML boundary, grouped by concern.

use anyhow::{Result, anyhow};

pub(super) mod path_tests;

pub(super) fn to_anyhow<T>(result: crate::ParamResult<T>) -> Result<T> {
    result.map_err(|err| anyhow!(err.to_string()))
}
