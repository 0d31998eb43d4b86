//! `Buffer2Base64`: encodes a byte-array parameter as a base64 string and
//! stores it on each item under a configurable field.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use plugin::{
    ConnectionType, ExecuteFunctions, Icon, ItemError, NodeDefaults, NodeError,
    NodeExecutionData, NodeProperty, NodeType, NodeTypeDescription, PropertyType,
};

use crate::codec::{self, DATA_BUFFER};

/// Registered type name.
pub const NODE_TYPE: &str = "buffer2base64";

pub const OUTPUT_FIELD_NAME: &str = "outputFieldName";
pub const DEFAULT_OUTPUT_FIELD: &str = "base64String";

/// The encoder node. Stateless; one value can serve any number of
/// concurrent invocations.
pub struct Buffer2Base64 {
    description: NodeTypeDescription,
}

impl Buffer2Base64 {
    pub fn new() -> Self {
        Self { description: describe() }
    }

    /// Encode one item, returning its transformed copy.
    fn process_item(
        &self,
        ctx: &dyn ExecuteFunctions,
        item_index: usize,
        item: &NodeExecutionData,
    ) -> Result<NodeExecutionData, NodeError> {
        let data = ctx.node_parameter(DATA_BUFFER, item_index, json!([]))?;
        let field = ctx.node_parameter(OUTPUT_FIELD_NAME, item_index, json!(DEFAULT_OUTPUT_FIELD))?;

        let field = match field {
            Value::String(name) if !name.is_empty() => name,
            Value::String(_) => {
                return Err(NodeError::invalid_parameter(OUTPUT_FIELD_NAME, "must not be empty"))
            }
            other => {
                return Err(NodeError::invalid_parameter(
                    OUTPUT_FIELD_NAME,
                    format!("expected a string, got {other}"),
                ))
            }
        };

        let bytes = codec::bytes_from_parameter(&data)?;
        let encoded = codec::encode(&bytes);
        debug!(item_index, bytes = bytes.len(), field = %field, "encoded item");

        let mut output = item.clone();
        output.json.insert(field, Value::String(encoded));
        Ok(output)
    }
}

impl Default for Buffer2Base64 {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NodeType for Buffer2Base64 {
    fn description(&self) -> &NodeTypeDescription {
        &self.description
    }

    async fn execute(
        &self,
        ctx: &dyn ExecuteFunctions,
    ) -> Result<Vec<Vec<NodeExecutionData>>, NodeError> {
        let items = ctx.input_data();
        let mut output = Vec::with_capacity(items.len());

        for (item_index, item) in items.iter().enumerate() {
            match self.process_item(ctx, item_index, item) {
                Ok(transformed) => output.push(transformed),
                Err(err) => {
                    let err = err.at_item(ctx.node(), item_index);
                    if !ctx.continue_on_fail() {
                        return Err(err);
                    }
                    warn!(item_index, error = %err, "item failed, continuing");
                    output.push(NodeExecutionData::error_entry(
                        item.json.clone(),
                        ItemError::new(ctx.node(), &err),
                        item_index,
                    ));
                }
            }
        }

        Ok(vec![output])
    }
}

fn describe() -> NodeTypeDescription {
    NodeTypeDescription {
        display_name: "Buffer2base64".into(),
        name: NODE_TYPE.into(),
        icon: Icon {
            light: "file:Buffer2base64.svg".into(),
            dark: "file:Buffer2base64.dark.svg".into(),
        },
        group: vec!["input".into()],
        version: 1,
        description: "Basic Buffer2base64 Node".into(),
        defaults: NodeDefaults { name: "Buffer2base64".into() },
        inputs: vec![ConnectionType::Main],
        outputs: vec![ConnectionType::Main],
        usable_as_tool: true,
        properties: vec![
            NodeProperty {
                display_name: "Data Buffer Array".into(),
                name: DATA_BUFFER.into(),
                kind: PropertyType::Json,
                default: json!(""),
                placeholder: Some("[104, 101, 108, 108, 111]".into()),
                description: Some("Array of byte values (0-255) to encode".into()),
            },
            NodeProperty {
                display_name: "Output Fieldname".into(),
                name: OUTPUT_FIELD_NAME.into(),
                kind: PropertyType::String,
                default: json!(DEFAULT_OUTPUT_FIELD),
                placeholder: Some(DEFAULT_OUTPUT_FIELD.into()),
                description: Some("The name of the field to output the base64 string to".into()),
            },
        ],
    }
}
