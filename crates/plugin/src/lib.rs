//! `plugin` crate: the host plugin contract.
//!
//! A node describes itself with a [`NodeTypeDescription`] and is executed
//! through [`NodeType::execute`], receiving the host's accessors as a
//! [`ExecuteFunctions`] trait object.

pub mod error;
pub mod models;
pub mod traits;
pub mod mock;

pub use error::{ErrorContext, ItemError, NodeError};
pub use models::{
    ConnectionType, Icon, ItemPairing, NodeDefaults, NodeExecutionData, NodeProperty, NodeTypeDescription,
    PairedItem, PropertyType,
};
pub use traits::{ExecuteFunctions, NodeIdentity, NodeType};
