//! Tool descriptor - static per-action metadata.
//!
//! A descriptor names one remote action and declares what a call must carry:
//! required parameters, enumerated-value constraints, and action-specific
//! defaults. Descriptors are built once and never mutated after registration.

use crate::types::{ActionName, Error, Result, ToolKey, ToolkitId};
use crate::validation::validate_non_empty;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Metadata for one `(toolkit, action)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub toolkit_id: String,
    pub action_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_params: BTreeSet<String>,
    /// Parameter name → allowed values, in declaration order.
    #[serde(default)]
    pub param_constraints: BTreeMap<String, Vec<String>>,
    /// Values inserted for absent parameters after validation.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub defaults: Map<String, Value>,
}

impl ToolDescriptor {
    pub fn new(toolkit_id: impl Into<String>, action_name: impl Into<String>) -> Self {
        Self {
            toolkit_id: toolkit_id.into(),
            action_name: action_name.into(),
            description: String::new(),
            required_params: BTreeSet::new(),
            param_constraints: BTreeMap::new(),
            defaults: Map::new(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_params
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn constrained<I, S>(mut self, name: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.param_constraints
            .insert(name.into(), allowed.into_iter().map(Into::into).collect());
        self
    }

    pub fn default_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }

    /// Typed registry key. Fails if either id is empty.
    pub fn key(&self) -> Result<ToolKey> {
        let toolkit_id = ToolkitId::from_string(self.toolkit_id.clone()).map_err(Error::validation)?;
        let action_name =
            ActionName::from_string(self.action_name.clone()).map_err(Error::validation)?;
        Ok(ToolKey {
            toolkit_id,
            action_name,
        })
    }

    /// Check internal consistency before registration.
    pub fn check(&self) -> Result<()> {
        validate_non_empty(&self.toolkit_id, "toolkit_id")?;
        validate_non_empty(&self.action_name, "action_name")?;

        for (name, allowed) in &self.param_constraints {
            if allowed.is_empty() {
                return Err(Error::validation(format!(
                    "{}/{}: constraint on {} allows no values",
                    self.toolkit_id, self.action_name, name
                )));
            }
        }

        for (name, value) in &self.defaults {
            if self.required_params.contains(name) {
                return Err(Error::validation(format!(
                    "{}/{}: required parameter {} cannot have a default",
                    self.toolkit_id, self.action_name, name
                )));
            }
            if let Some(allowed) = self.param_constraints.get(name) {
                let ok = value.as_str().map_or(false, |s| allowed.iter().any(|a| a == s));
                if !ok {
                    return Err(Error::validation(format!(
                        "{}/{}: default for {} is not one of: {}",
                        self.toolkit_id,
                        self.action_name,
                        name,
                        allowed.join(", ")
                    )));
                }
            }
        }

        Ok(())
    }

    /// Insert defaults for parameters the caller left out. Never overwrites.
    pub fn fill_defaults(&self, params: &mut Value) {
        if let Some(map) = params.as_object_mut() {
            for (name, default) in &self.defaults {
                if !map.contains_key(name) {
                    map.insert(name.clone(), default.clone());
                }
            }
        }
    }

    /// Every parameter name the descriptor knows about, sorted.
    pub fn param_names(&self) -> BTreeSet<&str> {
        self.required_params
            .iter()
            .chain(self.param_constraints.keys())
            .chain(self.defaults.keys())
            .map(String::as_str)
            .collect()
    }

    /// One-line listing.
    ///
    /// Format: `- TOOLKIT/ACTION(required, optional?): description`
    pub fn summary_line(&self) -> String {
        let params: Vec<String> = self
            .param_names()
            .into_iter()
            .map(|name| {
                let optional = if self.required_params.contains(name) { "" } else { "?" };
                match self.param_constraints.get(name) {
                    Some(allowed) => format!("{}{}: {}", name, optional, allowed.join("|")),
                    None => format!("{}{}", name, optional),
                }
            })
            .collect();

        let mut line = format!(
            "- {}/{}({})",
            self.toolkit_id,
            self.action_name,
            params.join(", ")
        );
        if !self.description.is_empty() {
            line.push_str(": ");
            line.push_str(&self.description);
        }
        line
    }
}
