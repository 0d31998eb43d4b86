//! `engine` crate: in-process host harness for running nodes.

pub mod models;
pub mod error;
pub mod context;
pub mod executor;

pub use models::NodeDefinition;
pub use error::EngineError;
pub use context::InvocationContext;
pub use executor::{registry_from, ExecutionResult, NodeExecutor, NodeRegistry};

#[cfg(test)]
mod executor_tests;
