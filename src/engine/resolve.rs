//! Outcome resolution - the single point deciding whether a remote action
//! succeeded.

use crate::envelope::InnerResult;
use crate::types::{Error, Result, EXECUTION_FAILED_MESSAGE};
use serde_json::Value;

/// Turn an inner result into data or a normalized error.
///
/// 1. `successful: false` → `RemoteExecution` (the `error` field verbatim, or
///    the generic message when it is absent or blank).
/// 2. `successful: true` without `data` → `EmptyResult`.
/// 3. Otherwise `data`, untouched.
pub fn resolve(inner: InnerResult) -> Result<Value> {
    if !inner.successful {
        let message = inner
            .error
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| EXECUTION_FAILED_MESSAGE.to_string());
        return Err(Error::remote_execution(message));
    }

    inner.data.ok_or(Error::EmptyResult)
}
