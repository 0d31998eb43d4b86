//! `MockExecuteFunctions`: a test double for the host side of the contract.
//!
//! Useful in unit and integration tests where no host is available: it
//! serves fixed parameters, optionally per item, and records every
//! parameter lookup it receives.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::NodeExecutionData;
use crate::traits::{ExecuteFunctions, NodeIdentity};
use crate::NodeError;

/// A mock host that resolves parameters from in-memory maps.
pub struct MockExecuteFunctions {
    pub node: NodeIdentity,
    pub items: Vec<NodeExecutionData>,
    /// Parameters shared by every item.
    pub parameters: HashMap<String, Value>,
    /// Per-item overrides, keyed by item index.
    pub item_parameters: HashMap<usize, HashMap<String, Value>>,
    /// Parameter lookups that fail with a host error, keyed by item index.
    pub failing_lookups: HashMap<usize, String>,
    pub continue_on_fail: bool,
    /// All `(name, item_index)` lookups seen (in call order).
    pub calls: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MockExecuteFunctions {
    /// Create a mock host for node type `node_type` over `items`.
    pub fn new(node_type: impl Into<String>, items: Vec<NodeExecutionData>) -> Self {
        Self {
            node: NodeIdentity::new("Mock", node_type),
            items,
            parameters: HashMap::new(),
            item_parameters: HashMap::new(),
            failing_lookups: HashMap::new(),
            continue_on_fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Convenience: build items from JSON objects.
    pub fn with_payloads(node_type: impl Into<String>, payloads: Vec<Value>) -> Self {
        let items = payloads
            .into_iter()
            .map(|v| match v {
                Value::Object(json) => NodeExecutionData::new(json),
                _ => NodeExecutionData::new(Map::new()),
            })
            .collect();
        Self::new(node_type, items)
    }

    pub fn parameter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    pub fn item_parameter(mut self, item_index: usize, name: impl Into<String>, value: Value) -> Self {
        self.item_parameters
            .entry(item_index)
            .or_default()
            .insert(name.into(), value);
        self
    }

    /// Make every parameter lookup for `item_index` fail with `message`.
    pub fn failing_at(mut self, item_index: usize, message: impl Into<String>) -> Self {
        self.failing_lookups.insert(item_index, message.into());
        self
    }

    pub fn continuing_on_fail(mut self) -> Self {
        self.continue_on_fail = true;
        self
    }

    /// Number of parameter lookups performed so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Item indices for which `name` was looked up.
    pub fn lookups_of(&self, name: &str) -> Vec<usize> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, i)| *i)
            .collect()
    }
}

impl ExecuteFunctions for MockExecuteFunctions {
    fn input_data(&self) -> &[NodeExecutionData] {
        &self.items
    }

    fn node_parameter(&self, name: &str, item_index: usize, default: Value) -> Result<Value, NodeError> {
        self.calls.lock().unwrap().push((name.to_owned(), item_index));

        if let Some(msg) = self.failing_lookups.get(&item_index) {
            return Err(NodeError::Host(msg.clone()));
        }

        let value = self
            .item_parameters
            .get(&item_index)
            .and_then(|params| params.get(name))
            .or_else(|| self.parameters.get(name))
            .cloned()
            .unwrap_or(default);
        Ok(value)
    }

    fn continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }

    fn node(&self) -> &NodeIdentity {
        &self.node
    }
}
