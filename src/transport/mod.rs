//! Transport boundary - the one place an invocation performs I/O.
//!
//! The engine only needs "send `(toolkit, action, params)`, receive the raw
//! envelope". Whatever goes wrong on the way (connectivity, auth, HTTP status,
//! unreadable body)
//! is reported as an opaque [`TransportError`] and passed through unchanged.

pub mod http;

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub use http::HttpTransport;

/// Opaque transport failure. The engine does not classify these further.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Request could not be sent or the reply could not be read.
    #[error("executor request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Executor answered with a non-success HTTP status.
    #[error("executor returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Executor answered 2xx with a body that is not JSON.
    #[error("executor returned a non-JSON body: {0}")]
    Body(String),

    /// Any other transport-specific failure.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Delivers one request to a remote executor and returns its raw envelope.
///
/// Implementations must be safe to call concurrently; invocations share no
/// state through this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransportInvoker: Send + Sync + fmt::Debug {
    async fn invoke(
        &self,
        toolkit_id: &str,
        action_name: &str,
        params: &Value,
    ) -> Result<Value, TransportError>;
}
