//! The plugin contract: what the host offers a node during execution
//! (`ExecuteFunctions`) and what every node must provide (`NodeType`).

use async_trait::async_trait;
use serde_json::Value;

use crate::models::{NodeExecutionData, NodeTypeDescription};
use crate::NodeError;

/// Identity of the configured node instance, used for error attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIdentity {
    /// Unique identifier of this instance within the host.
    pub id: uuid::Uuid,
    /// Instance name shown to the workflow author.
    pub name: String,
    /// Registered node type (`NodeTypeDescription::name`).
    pub node_type: String,
}

impl NodeIdentity {
    pub fn new(name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: name.into(),
            node_type: node_type.into(),
        }
    }
}

/// Accessors the host hands to a node for one invocation.
///
/// Parameter resolution (including any expression evaluation) happens on
/// the host side of this trait.
pub trait ExecuteFunctions: Send + Sync {
    /// The batch of items the node was invoked with.
    fn input_data(&self) -> &[NodeExecutionData];

    /// Resolve parameter `name` for the item at `item_index`, falling back to
    /// `default` when the parameter is not set.
    fn node_parameter(&self, name: &str, item_index: usize, default: Value)
        -> Result<Value, NodeError>;

    /// Whether per-item failures should be collected instead of aborting.
    fn continue_on_fail(&self) -> bool;

    /// The node instance being executed.
    fn node(&self) -> &NodeIdentity;
}

/// The core node trait.
///
/// Every node type loaded by the host implements this.
#[async_trait]
pub trait NodeType: Send + Sync {
    /// Static metadata declared to the host.
    fn description(&self) -> &NodeTypeDescription;

    /// Run one invocation over `ctx.input_data()` and return the output
    /// batches, one per output connection.
    async fn execute(
        &self,
        ctx: &dyn ExecuteFunctions,
    ) -> Result<Vec<Vec<NodeExecutionData>>, NodeError>;
}
