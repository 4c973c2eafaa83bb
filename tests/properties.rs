//! Property tests for the invocation pipeline's classification rules.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use toolbridge_core::engine::resolve;
use toolbridge_core::envelope::{unwrap_envelope, Envelope, InnerResult};
use toolbridge_core::validation::validate_params;
use toolbridge_core::{
    DescriptorRegistry, ErrorKind, ToolDescriptor, ToolEngine, TransportError, TransportInvoker,
};

#[derive(Debug, Default)]
struct CountingTransport {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl TransportInvoker for CountingTransport {
    async fn invoke(&self, _: &str, _: &str, _: &Value) -> Result<Value, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Envelope::from_payload(&json!({"successful": true, "data": {}})).to_value())
    }
}

fn param_name() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,12}"
}

/// Arbitrary JSON, a few levels deep.
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,16}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn empty_value() -> impl Strategy<Value = Value> {
    prop_oneof![Just(Value::Null), Just(json!("")), Just(json!([]))]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn missing_required_param_never_reaches_transport(
        name in param_name(),
        empty in prop::option::of(empty_value()),
    ) {
        let mut registry = DescriptorRegistry::new();
        registry.register(ToolDescriptor::new("KIT", "ACTION").required([name.clone()])).unwrap();

        let transport = Arc::new(CountingTransport::default());
        let engine = ToolEngine::new(Arc::new(registry), transport.clone());

        let params = match empty {
            Some(v) => json!({ name.clone(): v }),
            None => json!({}),
        };

        let err = runtime().block_on(engine.invoke("KIT", "ACTION", params)).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Validation);
        prop_assert!(err.to_string().contains(&name));
        prop_assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn present_required_params_validate(name in param_name(), value in "[ -~]{1,16}") {
        let descriptor = ToolDescriptor::new("KIT", "ACTION").required([name.clone()]);
        let params = json!({ name: value });
        prop_assert!(validate_params(&descriptor, &params).is_ok());
    }

    #[test]
    fn envelopes_without_text_are_format_errors(
        kind in "[a-z]{1,8}",
        extra in prop::collection::vec(json_value(), 0..3),
    ) {
        let mut content = vec![json!({"type": kind})];
        content.extend(extra);
        let err = unwrap_envelope(&json!({"content": content})).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::EnvelopeFormat);
    }

    #[test]
    fn non_json_text_is_parse_error(text in "[a-z{:]{1,20}") {
        prop_assume!(serde_json::from_str::<Value>(&text).is_err());
        let err = unwrap_envelope(&Envelope::from_text(text).to_value()).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Parse);
        prop_assert!(err.to_string().starts_with("Failed to parse MCP response JSON: "));
    }

    #[test]
    fn successful_data_is_returned_unchanged(data in json_value()) {
        prop_assume!(!data.is_null());
        let envelope = Envelope::from_payload(&json!({"successful": true, "data": data.clone()}));
        let resolved = resolve(unwrap_envelope(&envelope.to_value()).unwrap()).unwrap();
        prop_assert_eq!(resolved, data);
    }

    #[test]
    fn successful_without_data_is_empty_result(error in prop::option::of("[a-z_]{1,12}")) {
        let inner = InnerResult { successful: true, data: None, error };
        prop_assert_eq!(resolve(inner).unwrap_err().kind(), ErrorKind::EmptyResult);
    }

    #[test]
    fn unsuccessful_uses_error_or_generic(
        error in prop::option::of("[a-z_]{1,24}"),
        data in prop::option::of(json_value()),
    ) {
        let inner = InnerResult { successful: false, data, error: error.clone() };
        let err = resolve(inner).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::RemoteExecution);
        let expected = error.unwrap_or_else(|| "MCP tool execution failed".to_string());
        prop_assert_eq!(err.to_string(), expected);
    }
}

proptest! {
    #[test]
    fn blank_remote_error_falls_back_to_generic(data in prop::option::of(json_value())) {
        let mut payload = json!({"successful": false, "error": ""});
        if let Some(data) = data {
            payload["data"] = data;
        }
        let envelope = Envelope::from_payload(&payload).to_value();
        let err = resolve(unwrap_envelope(&envelope).unwrap()).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::RemoteExecution);
        prop_assert_eq!(err.to_string(), "MCP tool execution failed");
    }
}
