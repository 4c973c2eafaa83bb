//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation. The five
//! normalized invocation failures render their canonical message verbatim,
//! since downstream callers match on substrings of it.

use serde::Serialize;
use thiserror::Error;

use crate::transport::TransportError;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Canonical message for an envelope without `content[0].text`.
pub const ENVELOPE_FORMAT_MESSAGE: &str = "Invalid MCP response format: missing content[0].text";

/// Canonical message for a remote failure that carried no `error` field.
pub const EXECUTION_FAILED_MESSAGE: &str = "MCP tool execution failed";

/// Canonical message for a successful reply without `data`.
pub const EMPTY_RESULT_MESSAGE: &str = "MCP tool returned successful response but no data";

/// Main error enum for the invocation engine.
#[derive(Error, Debug)]
pub enum Error {
    /// Local parameter check failed; the transport was never called.
    #[error("{0}")]
    Validation(String),

    /// Transport replied without `content[0].text`.
    #[error("Invalid MCP response format: missing content[0].text")]
    EnvelopeFormat,

    /// `content[0].text` was not valid JSON.
    #[error("Failed to parse MCP response JSON: {0}")]
    Parse(String),

    /// Remote action reported `successful: false`.
    #[error("{0}")]
    RemoteExecution(String),

    /// Remote action reported success but supplied no `data`.
    #[error("MCP tool returned successful response but no data")]
    EmptyResult,

    /// Opaque transport failure, propagated unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// No descriptor registered for the requested action.
    #[error("not found: {0}")]
    NotFound(String),

    /// A facade could not interpret `data` as its result shape.
    #[error("failed to decode tool data: {0}")]
    Decode(String),

    /// Configuration errors.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors outside the unwrapper.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Classification of an [`Error`], independent of its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    EnvelopeFormat,
    Parse,
    RemoteExecution,
    EmptyResult,
    Transport,
    NotFound,
    Decode,
    Config,
    Serialization,
    Io,
}

impl ErrorKind {
    /// Stable upper-snake code, suitable for logs and machine-readable output.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::EnvelopeFormat => "ENVELOPE_FORMAT",
            ErrorKind::Parse => "PARSE",
            ErrorKind::RemoteExecution => "REMOTE_EXECUTION",
            ErrorKind::EmptyResult => "EMPTY_RESULT",
            ErrorKind::Transport => "TRANSPORT",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Decode => "DECODE",
            ErrorKind::Config => "CONFIG",
            ErrorKind::Serialization => "SERIALIZATION",
            ErrorKind::Io => "IO",
        }
    }

    /// True for the five kinds produced by the invocation pipeline itself.
    pub fn is_normalized(self) -> bool {
        matches!(
            self,
            ErrorKind::Validation
                | ErrorKind::EnvelopeFormat
                | ErrorKind::Parse
                | ErrorKind::RemoteExecution
                | ErrorKind::EmptyResult
        )
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::EnvelopeFormat => ErrorKind::EnvelopeFormat,
            Error::Parse(_) => ErrorKind::Parse,
            Error::RemoteExecution(_) => ErrorKind::RemoteExecution,
            Error::EmptyResult => ErrorKind::EmptyResult,
            Error::Transport(_) => ErrorKind::Transport,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Decode(_) => ErrorKind::Decode,
            Error::Config(_) => ErrorKind::Config,
            Error::Serialization(_) => ErrorKind::Serialization,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Render as `{ "code": ..., "message": ... }`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code(),
            "message": self.to_string(),
        })
    }
}

// Convenience constructors
impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn missing_param(name: &str) -> Self {
        Self::Validation(format!("Missing required parameter: {}", name))
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn remote_execution(msg: impl Into<String>) -> Self {
        Self::RemoteExecution(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_messages() {
        assert_eq!(
            Error::missing_param("id").to_string(),
            "Missing required parameter: id"
        );
        assert_eq!(Error::EnvelopeFormat.to_string(), ENVELOPE_FORMAT_MESSAGE);
        assert_eq!(
            Error::parse("expected value at line 1 column 1").to_string(),
            "Failed to parse MCP response JSON: expected value at line 1 column 1"
        );
        assert_eq!(
            Error::remote_execution(EXECUTION_FAILED_MESSAGE).to_string(),
            "MCP tool execution failed"
        );
        assert_eq!(Error::EmptyResult.to_string(), EMPTY_RESULT_MESSAGE);
    }

    #[test]
    fn test_remote_execution_is_verbatim() {
        let err = Error::remote_execution("channel_not_found");
        assert_eq!(err.to_string(), "channel_not_found");
        assert_eq!(err.kind(), ErrorKind::RemoteExecution);
    }

    #[test]
    fn test_transport_error_is_transparent() {
        let err: Error = TransportError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.to_string(), "executor returned HTTP 502: bad gateway");
        assert!(!err.kind().is_normalized());
    }

    #[test]
    fn test_to_json() {
        let value = Error::EmptyResult.to_json();
        assert_eq!(value["code"], "EMPTY_RESULT");
        assert_eq!(value["message"], EMPTY_RESULT_MESSAGE);
    }

    #[test]
    fn test_normalized_kinds() {
        assert!(ErrorKind::Validation.is_normalized());
        assert!(ErrorKind::EmptyResult.is_normalized());
        assert!(!ErrorKind::NotFound.is_normalized());
        assert!(!ErrorKind::Decode.is_normalized());
    }
}
