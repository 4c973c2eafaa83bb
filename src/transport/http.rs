//! HTTP transport - POSTs each request to a remote executor.
//!
//! Request body: `{"toolkitId": ..., "toolName": ..., "params": {...}}` sent to
//! `<endpoint>/tools/execute`. A 2xx JSON reply is handed back as-is; anything
//! else is a [`TransportError`].

use super::{TransportError, TransportInvoker};
use crate::types::{Error, Result, TransportConfig};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

const EXECUTE_PATH: &str = "/tools/execute";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteRequest<'a> {
    toolkit_id: &'a str,
    tool_name: &'a str,
    params: &'a Value,
}

/// `reqwest`-backed [`TransportInvoker`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let endpoint = config.endpoint.trim_end_matches('/');
        if endpoint.is_empty() {
            return Err(Error::config("transport endpoint is not set"));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: format!("{}{}", endpoint, EXECUTE_PATH),
            api_key: config.api_key.clone(),
        })
    }

    /// Full URL requests are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TransportInvoker for HttpTransport {
    async fn invoke(
        &self,
        toolkit_id: &str,
        action_name: &str,
        params: &Value,
    ) -> std::result::Result<Value, TransportError> {
        let body = ExecuteRequest {
            toolkit_id,
            tool_name: action_name,
            params,
        };

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_body(&text)
    }
}

fn parse_body(text: &str) -> std::result::Result<Value, TransportError> {
    serde_json::from_str(text).map_err(|e| {
        tracing::debug!(error = %e, "executor body is not JSON");
        TransportError::Body(text.to_string())
    })
}
