//! Core types for the invocation engine.
//!
//! This module provides foundational types used throughout the crate:
//! - **IDs**: Strongly-typed identifiers (ToolkitId, ActionName, InvocationId)
//! - **Errors**: The normalized error taxonomy with thiserror derives
//! - **Config**: Transport and observability configuration

mod config;
mod errors;
mod ids;

pub use config::{
    Config, ObservabilityConfig, TransportConfig, ENV_API_KEY, ENV_ENDPOINT, ENV_REQUEST_TIMEOUT,
};
pub use errors::{
    Error, ErrorKind, Result, EMPTY_RESULT_MESSAGE, ENVELOPE_FORMAT_MESSAGE,
    EXECUTION_FAILED_MESSAGE,
};
pub use ids::{ActionName, InvocationId, ToolKey, ToolkitId};
