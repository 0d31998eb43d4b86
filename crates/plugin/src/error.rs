//! Node-level error type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::traits::NodeIdentity;

/// Location details attached to an error raised while processing items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorContext {
    /// Index of the item that was being processed, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_index: Option<usize>,
}

/// Errors returned by a node's `execute` method or by the host accessors
/// it calls.
///
/// Only `InvalidParameter` carries an [`ErrorContext`]; `Host` errors are
/// wrapped into `Operation` once the failing item is known.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NodeError {
    /// A resolved parameter had a shape the node cannot work with.
    #[error("invalid value for parameter '{name}': {message}")]
    InvalidParameter {
        name: String,
        message: String,
        context: ErrorContext,
    },

    /// Failure reported by the host, e.g. while resolving a parameter.
    #[error("host error: {0}")]
    Host(String),

    /// Failure attributed to a node instance and the item it was processing.
    #[error("node '{node}' failed on item {item_index}: {message}")]
    Operation {
        node: String,
        item_index: usize,
        message: String,
    },
}

impl NodeError {
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Context structure carried by the error, if it has one.
    pub fn context_mut(&mut self) -> Option<&mut ErrorContext> {
        match self {
            Self::InvalidParameter { context, .. } => Some(context),
            Self::Host(_) | Self::Operation { .. } => None,
        }
    }

    /// Index of the failing item, when the error has been attributed.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            Self::InvalidParameter { context, .. } => context.item_index,
            Self::Operation { item_index, .. } => Some(*item_index),
            Self::Host(_) => None,
        }
    }

    /// Attribute the error to `item_index`.
    ///
    /// Errors that already carry an [`ErrorContext`] get the index written
    /// into it; all others are wrapped in [`NodeError::Operation`] naming the
    /// node.
    pub fn at_item(mut self, node: &NodeIdentity, item_index: usize) -> Self {
        if let Some(context) = self.context_mut() {
            context.item_index = Some(item_index);
            return self;
        }
        match self {
            Self::Operation { .. } => self,
            other => Self::Operation {
                node: node.name.clone(),
                item_index,
                message: other.to_string(),
            },
        }
    }
}

/// Serialisable form of a [`NodeError`], stored on error entries so
/// downstream nodes can inspect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemError {
    pub message: String,
    /// Name of the node instance that raised the error.
    pub node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_index: Option<usize>,
}

impl ItemError {
    pub fn new(node: &NodeIdentity, error: &NodeError) -> Self {
        Self {
            message: error.to_string(),
            node: node.name.clone(),
            item_index: error.item_index(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> NodeIdentity {
        NodeIdentity::new("Encode", "buffer2base64")
    }

    #[test]
    fn error_with_context_keeps_its_variant() {
        let err = NodeError::invalid_parameter("dataBuffer", "not an array").at_item(&node(), 4);

        assert!(matches!(
            &err,
            NodeError::InvalidParameter { name, context, .. }
                if name == "dataBuffer" && context.item_index == Some(4)
        ));
        assert_eq!(err.item_index(), Some(4));
    }

    #[test]
    fn error_without_context_is_wrapped() {
        let err = NodeError::Host("expression failed".into()).at_item(&node(), 2);

        match err {
            NodeError::Operation { node, item_index, message } => {
                assert_eq!(node, "Encode");
                assert_eq!(item_index, 2);
                assert!(message.contains("expression failed"));
            }
            other => panic!("expected Operation, got {other:?}"),
        }
    }

    #[test]
    fn operation_error_is_not_rewrapped() {
        let err = NodeError::Operation {
            node: "Other".into(),
            item_index: 0,
            message: "boom".into(),
        };
        assert_eq!(err.clone().at_item(&node(), 7), err);
    }

    #[test]
    fn item_error_captures_message_node_and_index() {
        let err = NodeError::invalid_parameter("outputFieldName", "must not be empty")
            .at_item(&node(), 1);
        let item_error = ItemError::new(&node(), &err);

        assert_eq!(item_error.node, "Encode");
        assert_eq!(item_error.item_index, Some(1));
        assert_eq!(
            item_error.message,
            "invalid value for parameter 'outputFieldName': must not be empty"
        );
    }
}
