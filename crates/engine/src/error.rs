//! Engine-level error types.

use thiserror::Error;

/// Errors produced while running a node through the harness.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No node type is registered under the requested name.
    #[error("no implementation registered for node_type '{0}'")]
    UnknownNodeType(String),

    /// The node aborted the invocation.
    #[error(transparent)]
    Node(#[from] plugin::NodeError),
}
