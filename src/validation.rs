//! Parameter validation against a tool descriptor.
//!
//! Runs before anything is sent: required parameters must be present and
//! non-empty, constrained parameters must hold one of their allowed values.
//! The first violation fails the call. Parameters that are neither required
//! nor constrained pass through unchecked, whatever their type.

use crate::tools::ToolDescriptor;
use crate::types::{Error, Result};
use serde_json::Value;

/// Validate that a string is not empty.
pub fn validate_non_empty(s: &str, field: &str) -> Result<()> {
    if s.is_empty() {
        return Err(Error::validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Null, `""` and `[]` count as absent for required parameters.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Check `params` against the descriptor's required set and constraints.
pub fn validate_params(descriptor: &ToolDescriptor, params: &Value) -> Result<()> {
    let map = params
        .as_object()
        .ok_or_else(|| Error::validation("Parameters must be a JSON object"))?;

    for name in &descriptor.required_params {
        match map.get(name) {
            Some(value) if !is_empty_value(value) => {}
            _ => return Err(Error::missing_param(name)),
        }
    }

    for (name, allowed) in &descriptor.param_constraints {
        let Some(value) = map.get(name) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        let matches = value
            .as_str()
            .map_or(false, |s| allowed.iter().any(|a| a == s));
        if !matches {
            return Err(Error::validation(format!(
                "Invalid value for parameter {}: '{}'. Must be one of: {}",
                name,
                display_value(value),
                allowed.join(", ")
            )));
        }
    }

    Ok(())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
