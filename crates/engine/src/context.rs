//! `InvocationContext`: the harness's implementation of the host accessors.
//!
//! Parameters resolve to the definition's configured value, or to the
//! default the node asks for. No expressions are evaluated.

use serde_json::Value;

use plugin::{ExecuteFunctions, NodeError, NodeExecutionData, NodeIdentity};

use crate::models::NodeDefinition;

/// State for one invocation of one node.
#[derive(Debug)]
pub struct InvocationContext<'a> {
    definition: &'a NodeDefinition,
    identity: NodeIdentity,
    items: Vec<NodeExecutionData>,
}

impl<'a> InvocationContext<'a> {
    pub fn new(definition: &'a NodeDefinition, items: Vec<NodeExecutionData>) -> Self {
        Self {
            definition,
            identity: NodeIdentity::new(&definition.name, &definition.node_type),
            items,
        }
    }
}

impl ExecuteFunctions for InvocationContext<'_> {
    fn input_data(&self) -> &[NodeExecutionData] {
        &self.items
    }

    fn node_parameter(&self, name: &str, item_index: usize, default: Value) -> Result<Value, NodeError> {
        if item_index >= self.items.len() {
            return Err(NodeError::Host(format!(
                "item index {item_index} out of range for {} input items",
                self.items.len()
            )));
        }
        Ok(self.definition.parameters.get(name).cloned().unwrap_or(default))
    }

    fn continue_on_fail(&self) -> bool {
        self.definition.continue_on_fail
    }

    fn node(&self) -> &NodeIdentity {
        &self.identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[test]
    fn configured_value_wins_over_default() {
        let def = NodeDefinition::new("Encode", "buffer2base64")
            .with_parameter("outputFieldName", json!("b64"));
        let ctx = InvocationContext::new(&def, vec![NodeExecutionData::new(Map::new())]);

        assert_eq!(ctx.node_parameter("outputFieldName", 0, json!("x")).unwrap(), json!("b64"));
        assert_eq!(ctx.node_parameter("dataBuffer", 0, json!([])).unwrap(), json!([]));
    }

    #[test]
    fn out_of_range_index_is_a_host_error() {
        let def = NodeDefinition::new("Encode", "buffer2base64");
        let ctx = InvocationContext::new(&def, Vec::new());

        assert!(matches!(
            ctx.node_parameter("dataBuffer", 0, Value::Null),
            Err(NodeError::Host(_))
        ));
    }

    #[test]
    fn identity_and_flag_come_from_definition() {
        let def = NodeDefinition::new("Encode", "buffer2base64").continuing_on_fail();
        let ctx = InvocationContext::new(&def, Vec::new());

        assert_eq!(ctx.node().name, "Encode");
        assert_eq!(ctx.node().node_type, "buffer2base64");
        assert!(ctx.continue_on_fail());
    }
}
