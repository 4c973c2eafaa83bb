//! Response envelope - the transport's raw reply and its embedded payload.
//!
//! Wire shape:
//! ```text
//! { "content": [ { "type": "text", "text": "<JSON string>" } ] }
//!                                           │
//!                                           ▼
//!        { "successful": bool, "data"?: object, "error"?: string }
//! ```
//! Only `content[0]` is read; later elements are ignored.

use crate::types::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Wire types
// =============================================================================

/// One element of the envelope's `content` sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: Some(text.into()),
        }
    }
}

/// The transport's reply.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

impl Envelope {
    /// Envelope carrying a single text block.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
        }
    }

    /// Envelope whose text block is the serialized `payload`.
    pub fn from_payload(payload: &Value) -> Self {
        Self::from_text(payload.to_string())
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!(self)
    }
}

impl From<Envelope> for Value {
    fn from(envelope: Envelope) -> Self {
        envelope.to_value()
    }
}

/// Payload parsed from `content[0].text`.
///
/// Built with [`InnerResult::from_value`] rather than a serde derive: executors
/// send non-boolean `successful` flags and structured `error` values, and
/// those must classify instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InnerResult {
    pub successful: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InnerResult {
    pub fn success(data: Value) -> Self {
        Self {
            successful: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            successful: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Read the three known fields from arbitrary JSON.
    ///
    /// A missing or non-boolean `successful` reads as `false`. A `null` `data`
    /// reads as absent, as does a `null` or empty `error`. A non-string `error`
    /// keeps its JSON text.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };

        let successful = map
            .get("successful")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let data = map.remove("data").filter(|d| !d.is_null());
        let error = match map.remove("error") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };

        Self {
            successful,
            data,
            error,
        }
    }
}

// =============================================================================
// Unwrapping
// =============================================================================

/// Borrow `content[0].text`, requiring it to be a non-empty string.
pub fn extract_text(envelope: &Value) -> Result<&str> {
    envelope
        .get("content")
        .and_then(Value::as_array)
        .and_then(|content| content.first())
        .and_then(|first| first.get("text"))
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .ok_or(Error::EnvelopeFormat)
}

/// Extract and parse the inner payload. Valid JSON is all that is required
/// here; success/failure is decided by the resolver.
pub fn unwrap_envelope(envelope: &Value) -> Result<InnerResult> {
    let text = extract_text(envelope)?;
    let payload: Value = serde_json::from_str(text).map_err(|e| Error::parse(e.to_string()))?;
    Ok(InnerResult::from_value(payload))
}

// =============================================================================
// Tests
// =============================================================================
