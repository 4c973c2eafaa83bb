//! Invocation engine.
//!
//! One generic pipeline shared by every facade:
//! ```text
//!   caller ─▶ validate ─▶ transport ─▶ unwrap ─▶ resolve ─▶ data
//!               │            │           │          │
//!               └────────────┴───────────┴──────────┴──▶ Error
//! ```
//! Each call owns its request; the registry and transport are shared
//! read-only, so any number of invocations may run concurrently. Nothing is
//! retried, cached, or cancelled here.

pub mod resolve;
pub mod state;

use crate::envelope::unwrap_envelope;
use crate::tools::{DescriptorRegistry, ToolDescriptor};
use crate::transport::TransportInvoker;
use crate::types::{Error, InvocationId, Result};
use crate::validation::validate_params;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;

pub use resolve::resolve;
pub use state::{InvocationState, StateTrace};

/// One call in progress. Owned by the invocation and dropped when it ends.
#[derive(Debug)]
pub struct InvocationRequest<'d> {
    pub id: InvocationId,
    pub descriptor: &'d ToolDescriptor,
    pub params: Value,
}

impl<'d> InvocationRequest<'d> {
    pub fn new(descriptor: &'d ToolDescriptor, params: Value) -> Self {
        Self {
            id: InvocationId::new(),
            descriptor,
            params,
        }
    }
}

/// Generic tool-invocation engine. Cheap to clone.
#[derive(Clone)]
pub struct ToolEngine {
    registry: Arc<DescriptorRegistry>,
    transport: Arc<dyn TransportInvoker>,
}

impl fmt::Debug for ToolEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolEngine")
            .field("tools", &self.registry.len())
            .field("transport", &self.transport)
            .finish()
    }
}

impl ToolEngine {
    pub fn new(registry: Arc<DescriptorRegistry>, transport: Arc<dyn TransportInvoker>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    /// Engine over every built-in facade descriptor.
    pub fn with_builtin_tools(transport: Arc<dyn TransportInvoker>) -> Result<Self> {
        Ok(Self::new(Arc::new(DescriptorRegistry::builtin()?), transport))
    }

    pub fn registry(&self) -> &DescriptorRegistry {
        &self.registry
    }

    /// Invoke a registered action and return its `data` untouched.
    ///
    /// An unknown pair fails with `NotFound` before any invocation starts, so
    /// it has no invocation id or state trace; it is still logged at warn.
    pub async fn invoke(&self, toolkit_id: &str, action_name: &str, params: Value) -> Result<Value> {
        let descriptor = match self.registry.lookup(toolkit_id, action_name) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                tracing::warn!(
                    toolkit = toolkit_id,
                    action = action_name,
                    code = e.code(),
                    "invocation_failed: {}",
                    e
                );
                return Err(e);
            }
        };
        self.execute(InvocationRequest::new(descriptor, params)).await
    }

    /// Invoke and deserialize `data` into `R`.
    pub async fn invoke_as<R: DeserializeOwned>(
        &self,
        toolkit_id: &str,
        action_name: &str,
        params: Value,
    ) -> Result<R> {
        let data = self.invoke(toolkit_id, action_name, params).await?;
        serde_json::from_value(data)
            .map_err(|e| Error::decode(format!("{}/{}: {}", toolkit_id, action_name, e)))
    }

    /// Typed facade entry point: serialize `params`, invoke, deserialize.
    pub async fn call<P, R>(&self, toolkit_id: &str, action_name: &str, params: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let params = serde_json::to_value(params)?;
        self.invoke_as(toolkit_id, action_name, params).await
    }

    /// Run a request through the full pipeline.
    pub async fn execute(&self, request: InvocationRequest<'_>) -> Result<Value> {
        self.execute_traced(request).await.0
    }

    /// Like [`execute`](Self::execute), also returning the states visited.
    pub async fn execute_traced(
        &self,
        request: InvocationRequest<'_>,
    ) -> (Result<Value>, Vec<InvocationState>) {
        let span = tracing::debug_span!(
            "invocation",
            id = %request.id,
            toolkit = %request.descriptor.toolkit_id,
            action = %request.descriptor.action_name,
        );

        async move {
            let mut trace = StateTrace::start();
            let result = self.run(request, &mut trace).await;

            match &result {
                Ok(_) => tracing::debug!("invocation_resolved"),
                Err(e) => {
                    trace.fail(e.kind());
                    tracing::warn!(code = e.code(), "invocation_failed: {}", e);
                }
            }

            (result, trace.into_history())
        }
        .instrument(span)
        .await
    }

    async fn run(&self, request: InvocationRequest<'_>, trace: &mut StateTrace) -> Result<Value> {
        let InvocationRequest {
            descriptor,
            mut params,
            ..
        } = request;

        validate_params(descriptor, &params)?;
        descriptor.fill_defaults(&mut params);

        trace.advance(InvocationState::Invoking);
        let envelope = self
            .transport
            .invoke(&descriptor.toolkit_id, &descriptor.action_name, &params)
            .await?;

        trace.advance(InvocationState::Unwrapping);
        let data = resolve(unwrap_envelope(&envelope)?)?;

        trace.advance(InvocationState::Resolved);
        Ok(data)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Envelope;
    use crate::transport::{MockTransportInvoker, TransportError};
    use crate::types::ErrorKind;
    use serde_json::json;
    use tracing_test::traced_test;

    fn registry() -> Arc<DescriptorRegistry> {
        let mut registry = DescriptorRegistry::new();
        registry
            .register(
                ToolDescriptor::new("FIRECRAWL", "FIRECRAWL_CANCEL_CRAWL_JOB").required(["id"]),
            )
            .unwrap();
        registry
            .register(
                ToolDescriptor::new("FIRECRAWL", "FIRECRAWL_SEARCH")
                    .required(["query"])
                    .default_value("limit", 5),
            )
            .unwrap();
        Arc::new(registry)
    }

    fn engine(mock: MockTransportInvoker) -> ToolEngine {
        ToolEngine::new(registry(), Arc::new(mock))
    }

    fn replying(payload: Value) -> MockTransportInvoker {
        let mut mock = MockTransportInvoker::new();
        mock.expect_invoke()
            .times(1)
            .returning(move |_, _, _| Ok(Envelope::from_payload(&payload).to_value()));
        mock
    }

    #[tokio::test]
    async fn test_resolves_data() {
        let engine = engine(replying(json!({"successful": true, "data": {"status": "cancelled"}})));
        let data = engine
            .invoke("FIRECRAWL", "FIRECRAWL_CANCEL_CRAWL_JOB", json!({"id": "job-1"}))
            .await
            .unwrap();
        assert_eq!(data, json!({"status": "cancelled"}));
    }

    #[tokio::test]
    async fn test_validation_never_reaches_transport() {
        let mut mock = MockTransportInvoker::new();
        mock.expect_invoke().never();
        let engine = engine(mock);

        let err = engine
            .invoke("FIRECRAWL", "FIRECRAWL_CANCEL_CRAWL_JOB", json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing required parameter: id");
    }

    #[tokio::test]
    async fn test_unknown_tool_never_reaches_transport() {
        let mut mock = MockTransportInvoker::new();
        mock.expect_invoke().never();
        let engine = engine(mock);

        let err = engine
            .invoke("FIRECRAWL", "FIRECRAWL_DELETE_EVERYTHING", json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_transport_receives_ids_and_defaults() {
        let mut mock = MockTransportInvoker::new();
        mock.expect_invoke()
            .withf(|toolkit, action, params| {
                toolkit == "FIRECRAWL"
                    && action == "FIRECRAWL_SEARCH"
                    && params == &json!({"query": "rust", "limit": 5})
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(Envelope::from_payload(&json!({"successful": true, "data": []})).to_value())
            });
        let engine = engine(mock);

        let data = engine
            .invoke("FIRECRAWL", "FIRECRAWL_SEARCH", json!({"query": "rust"}))
            .await
            .unwrap();
        assert_eq!(data, json!([]));
    }

    #[tokio::test]
    async fn test_transport_error_propagates_unchanged() {
        let mut mock = MockTransportInvoker::new();
        mock.expect_invoke()
            .times(1)
            .returning(|_, _, _| Err(TransportError::other("connection refused")));
        let engine = engine(mock);

        let err = engine
            .invoke("FIRECRAWL", "FIRECRAWL_CANCEL_CRAWL_JOB", json!({"id": "job-1"}))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn test_trace_on_success() {
        let engine = engine(replying(json!({"successful": true, "data": {}})));
        let registry = registry();
        let descriptor = registry.get("FIRECRAWL", "FIRECRAWL_CANCEL_CRAWL_JOB").unwrap();

        let (result, states) = engine
            .execute_traced(InvocationRequest::new(descriptor, json!({"id": "x"})))
            .await;
        assert!(result.is_ok());
        assert_eq!(
            states,
            vec![
                InvocationState::Validating,
                InvocationState::Invoking,
                InvocationState::Unwrapping,
                InvocationState::Resolved,
            ]
        );
    }

    #[tokio::test]
    async fn test_trace_on_remote_failure() {
        let engine = engine(replying(json!({"successful": false, "error": "rate_limited"})));
        let registry = registry();
        let descriptor = registry.get("FIRECRAWL", "FIRECRAWL_CANCEL_CRAWL_JOB").unwrap();

        let (result, states) = engine
            .execute_traced(InvocationRequest::new(descriptor, json!({"id": "x"})))
            .await;
        assert_eq!(result.unwrap_err().to_string(), "rate_limited");
        assert_eq!(
            states.last(),
            Some(&InvocationState::Failed(ErrorKind::RemoteExecution))
        );
        assert!(!states.contains(&InvocationState::Resolved));
    }

    #[tokio::test]
    async fn test_trace_on_validation_failure() {
        let mut mock = MockTransportInvoker::new();
        mock.expect_invoke().never();
        let engine = engine(mock);
        let registry = registry();
        let descriptor = registry.get("FIRECRAWL", "FIRECRAWL_SEARCH").unwrap();

        let (_, states) = engine
            .execute_traced(InvocationRequest::new(descriptor, json!({"query": ""})))
            .await;
        assert_eq!(
            states,
            vec![
                InvocationState::Validating,
                InvocationState::Failed(ErrorKind::Validation),
            ]
        );
    }

    #[tokio::test]
    async fn test_invoke_as_decode_error() {
        let engine = engine(replying(json!({"successful": true, "data": {"status": 3}})));

        #[derive(Debug, serde::Deserialize)]
        struct Status {
            #[allow(dead_code)]
            status: String,
        }

        let err = engine
            .invoke_as::<Status>("FIRECRAWL", "FIRECRAWL_CANCEL_CRAWL_JOB", json!({"id": "x"}))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.to_string().contains("FIRECRAWL/FIRECRAWL_CANCEL_CRAWL_JOB"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_failure_is_logged_with_code() {
        let engine = engine(replying(json!({"successful": true})));
        let err = engine
            .invoke("FIRECRAWL", "FIRECRAWL_CANCEL_CRAWL_JOB", json!({"id": "x"}))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResult);
        assert!(logs_contain("invocation_failed"));
        assert!(logs_contain("EMPTY_RESULT"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_unknown_tool_is_logged_with_code() {
        let mut mock = MockTransportInvoker::new();
        mock.expect_invoke().never();
        let engine = engine(mock);

        let err = engine
            .invoke("SLACK", "SLACK_NOPE", json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(logs_contain("invocation_failed"));
        assert!(logs_contain("NOT_FOUND"));
        assert!(logs_contain("SLACK_NOPE"));
    }
}
