//! Descriptor registry - one descriptor per `(toolkit, action)`.
//!
//! Populated once at startup, then shared read-only (typically behind an
//! `Arc`). Lookups take `&self` only, so concurrent readers need no locking.

use super::descriptor::ToolDescriptor;
use crate::types::{Error, Result};
use std::collections::HashMap;

/// In-memory descriptor table keyed by toolkit, then action.
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    entries: HashMap<String, HashMap<String, ToolDescriptor>>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registry holding every built-in facade descriptor.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for descriptor in crate::facades::all_descriptors() {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Register a descriptor. Duplicate `(toolkit, action)` pairs are rejected.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<()> {
        descriptor.check()?;
        let key = descriptor.key()?;

        let actions = self
            .entries
            .entry(descriptor.toolkit_id.clone())
            .or_default();
        if actions.contains_key(&descriptor.action_name) {
            return Err(Error::validation(format!("Tool already registered: {}", key)));
        }

        tracing::debug!("Registered tool descriptor: {}", key);
        actions.insert(descriptor.action_name.clone(), descriptor);
        Ok(())
    }

    pub fn get(&self, toolkit_id: &str, action_name: &str) -> Option<&ToolDescriptor> {
        self.entries
            .get(toolkit_id)
            .and_then(|actions| actions.get(action_name))
    }

    /// Like [`get`](Self::get), but an unknown pair is a `NotFound` error.
    pub fn lookup(&self, toolkit_id: &str, action_name: &str) -> Result<&ToolDescriptor> {
        self.get(toolkit_id, action_name).ok_or_else(|| {
            Error::not_found(format!("Unknown tool: {}/{}", toolkit_id, action_name))
        })
    }

    pub fn contains(&self, toolkit_id: &str, action_name: &str) -> bool {
        self.get(toolkit_id, action_name).is_some()
    }

    /// Toolkit ids, sorted.
    pub fn toolkits(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// All descriptors, sorted by toolkit then action.
    pub fn list(&self) -> Vec<&ToolDescriptor> {
        let mut entries: Vec<&ToolDescriptor> = self
            .entries
            .values()
            .flat_map(|actions| actions.values())
            .collect();
        entries.sort_by(|a, b| {
            a.toolkit_id
                .cmp(&b.toolkit_id)
                .then_with(|| a.action_name.cmp(&b.action_name))
        });
        entries
    }

    /// Formatted listing, optionally restricted to one toolkit.
    pub fn summary(&self, toolkit_id: Option<&str>) -> String {
        let entries: Vec<&ToolDescriptor> = self
            .list()
            .into_iter()
            .filter(|d| toolkit_id.map_or(true, |id| d.toolkit_id == id))
            .collect();

        if entries.is_empty() {
            return String::new();
        }

        let mut lines = Vec::with_capacity(entries.len() + 1);
        lines.push("Available tools:".to_string());
        for entry in entries {
            lines.push(entry.summary_line());
        }
        lines.join("\n")
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Tests
// =============================================================================
