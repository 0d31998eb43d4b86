//! `nodes` crate: built-in node implementations.
//!
//! Every node here implements [`plugin::NodeType`]; hosts discover them
//! through [`builtin_nodes`].

use std::sync::Arc;

use plugin::NodeType;

pub mod buffer_to_base64;
pub mod codec;

pub use buffer_to_base64::Buffer2Base64;

/// All node types shipped by this crate.
pub fn builtin_nodes() -> Vec<Arc<dyn NodeType>> {
    vec![Arc::new(Buffer2Base64::new())]
}
