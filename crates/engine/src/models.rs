//! Node instance configuration as the harness reads it.
//!
//! A `NodeDefinition` is one configured node: which type it is, the values
//! its parameters resolve to, and how it reacts to item failures.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single configured node instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDefinition {
    /// Instance name shown in errors.
    pub name: String,
    /// Maps to a registered `NodeType` implementation.
    pub node_type: String,
    /// Parameter values, applied to every item.
    #[serde(default)]
    pub parameters: Map<String, Value>,
    /// Collect failing items as error entries instead of aborting.
    #[serde(default)]
    pub continue_on_fail: bool,
}

impl NodeDefinition {
    /// Convenience constructor for testing.
    pub fn new(name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
            parameters: Map::new(),
            continue_on_fail: false,
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    pub fn continuing_on_fail(mut self) -> Self {
        self.continue_on_fail = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_definition_deserialises_with_defaults() {
        let def: NodeDefinition =
            serde_json::from_value(json!({ "name": "Encode", "nodeType": "buffer2base64" }))
                .unwrap();

        assert_eq!(def.name, "Encode");
        assert!(def.parameters.is_empty());
        assert!(!def.continue_on_fail);
    }

    #[test]
    fn full_definition_deserialises() {
        let def: NodeDefinition = serde_json::from_value(json!({
            "name": "Encode",
            "nodeType": "buffer2base64",
            "parameters": { "dataBuffer": [1, 2], "outputFieldName": "b64" },
            "continueOnFail": true
        }))
        .unwrap();

        assert_eq!(def.parameters["dataBuffer"], json!([1, 2]));
        assert!(def.continue_on_fail);
    }
}
