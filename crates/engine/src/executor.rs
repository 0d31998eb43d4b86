//! Node execution harness.
//!
//! `NodeExecutor` stands in for the host when running a node in-process:
//! 1. Looks the definition's `node_type` up in the registry.
//! 2. Builds an `InvocationContext` over the input batch.
//! 3. Calls `NodeType::execute` once and returns its output batches.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, instrument, warn};

use plugin::{NodeExecutionData, NodeType};

use crate::context::InvocationContext;
use crate::models::NodeDefinition;
use crate::EngineError;

// ---------------------------------------------------------------------------
// Node registry
// ---------------------------------------------------------------------------

/// Maps `node_type` strings to shared `NodeType` implementations.
pub type NodeRegistry = HashMap<String, Arc<dyn NodeType>>;

/// Build a registry keyed by each node's declared type name.
pub fn registry_from(nodes: impl IntoIterator<Item = Arc<dyn NodeType>>) -> NodeRegistry {
    nodes
        .into_iter()
        .map(|node| (node.description().name.clone(), node))
        .collect()
}

// ---------------------------------------------------------------------------
// Output of a completed invocation
// ---------------------------------------------------------------------------

/// The result of running one node invocation.
#[derive(Debug)]
pub struct ExecutionResult {
    pub execution_id: uuid::Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Output batches exactly as the node returned them.
    pub output: Vec<Vec<NodeExecutionData>>,
}

impl ExecutionResult {
    /// Number of error entries across all batches.
    pub fn error_count(&self) -> usize {
        self.output.iter().flatten().filter(|item| item.is_error()).count()
    }
}

// ---------------------------------------------------------------------------
// NodeExecutor
// ---------------------------------------------------------------------------

/// Stateless runner for single node invocations.
pub struct NodeExecutor {
    registry: NodeRegistry,
}

impl NodeExecutor {
    pub fn new(registry: NodeRegistry) -> Self {
        Self { registry }
    }

    /// Registered node types, sorted by name.
    pub fn node_types(&self) -> Vec<&dyn NodeType> {
        let mut nodes: Vec<&dyn NodeType> = self.registry.values().map(|n| n.as_ref()).collect();
        nodes.sort_by(|a, b| a.description().name.cmp(&b.description().name));
        nodes
    }

    pub fn node_type(&self, name: &str) -> Option<&dyn NodeType> {
        self.registry.get(name).map(|n| n.as_ref())
    }

    /// Run `definition` once over `items`.
    ///
    /// # Errors
    /// [`EngineError::UnknownNodeType`] if the type is not registered, or
    /// [`EngineError::Node`] if the node aborted the invocation.
    #[instrument(skip(self, items), fields(node = %definition.name, node_type = %definition.node_type))]
    pub async fn run(
        &self,
        definition: &NodeDefinition,
        items: Vec<NodeExecutionData>,
    ) -> Result<ExecutionResult, EngineError> {
        let node = self
            .node_type(&definition.node_type)
            .ok_or_else(|| EngineError::UnknownNodeType(definition.node_type.clone()))?;

        let execution_id = uuid::Uuid::new_v4();
        let started_at = Utc::now();
        let input_count = items.len();
        let ctx = InvocationContext::new(definition, items);

        let output = match node.execute(&ctx).await {
            Ok(output) => output,
            Err(err) => {
                error!("node '{}' failed: {}", definition.name, err);
                return Err(err.into());
            }
        };

        let result = ExecutionResult {
            execution_id,
            started_at,
            finished_at: Utc::now(),
            output,
        };

        let failed = result.error_count();
        if failed > 0 {
            warn!("node '{}' recorded {} failed item(s)", definition.name, failed);
        }
        info!(
            "node '{}' execution {} finished: {} item(s) in, {} batch(es) out",
            definition.name,
            execution_id,
            input_count,
            result.output.len()
        );

        Ok(result)
    }
}
