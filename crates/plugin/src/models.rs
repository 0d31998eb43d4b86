//! Data exchanged between the host and a node.
//!
//! These types mirror the host's JSON wire shapes, so every struct here
//! serialises with camelCase keys and can be round-tripped through the
//! item and metadata documents the host produces.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ItemError;

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Link from an output item back to the input item it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PairedItemRepr")]
pub struct PairedItem {
    /// Index of the originating item in the node's input batch.
    pub item: usize,
    /// Input connection the item arrived on, when the host records it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<usize>,
}

impl From<usize> for PairedItem {
    fn from(item: usize) -> Self {
        Self { item, input: None }
    }
}

/// The host writes a single pairing either as a bare index or as
/// `{ "item": n }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PairedItemRepr {
    Index(usize),
    Object {
        item: usize,
        #[serde(default)]
        input: Option<usize>,
    },
}

impl From<PairedItemRepr> for PairedItem {
    fn from(repr: PairedItemRepr) -> Self {
        match repr {
            PairedItemRepr::Index(item) => Self::from(item),
            PairedItemRepr::Object { item, input } => Self { item, input },
        }
    }
}

/// Pairing metadata of an item: one source item, or several when the item
/// was derived from more than one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemPairing {
    One(PairedItem),
    Many(Vec<PairedItem>),
}

impl From<usize> for ItemPairing {
    fn from(item: usize) -> Self {
        Self::One(PairedItem::from(item))
    }
}

/// One unit of data flowing through the host's execution pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeExecutionData {
    /// The item's JSON payload.
    #[serde(default)]
    pub json: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_item: Option<ItemPairing>,
    /// Set only on error entries emitted in continue-on-fail mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ItemError>,
    /// Host fields nodes do not interpret (`binary`, ...), carried through
    /// untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeExecutionData {
    /// Item carrying `json` and nothing else.
    pub fn new(json: Map<String, Value>) -> Self {
        Self { json, ..Default::default() }
    }

    /// Build an item from any JSON value; non-object values are rejected
    /// by returning `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(json) => Some(Self::new(json)),
            _ => None,
        }
    }

    /// Error entry for the item at `item_index`.
    pub fn error_entry(json: Map<String, Value>, error: ItemError, item_index: usize) -> Self {
        Self {
            json,
            paired_item: Some(ItemPairing::from(item_index)),
            error: Some(error),
            extra: Map::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

// ---------------------------------------------------------------------------
// Node metadata
// ---------------------------------------------------------------------------

/// Kind of connection a node accepts or produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionType {
    /// The host's generic data connection.
    Main,
}

/// Light/dark icon pair shown by the host's editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    pub light: String,
    pub dark: String,
}

/// Type tag of a configurable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    Json,
    String,
}

/// A single configurable parameter as declared to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: String,
    /// Key passed to `ExecuteFunctions::node_parameter`.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    pub default: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Default settings applied when a node instance is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDefaults {
    /// Instance name given to freshly placed nodes.
    pub name: String,
}

/// Static metadata describing a node type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTypeDescription {
    pub display_name: String,
    /// Unique identifier the host registers the node under.
    pub name: String,
    pub icon: Icon,
    #[serde(default)]
    pub group: Vec<String>,
    pub version: u32,
    pub description: String,
    pub defaults: NodeDefaults,
    pub inputs: Vec<ConnectionType>,
    pub outputs: Vec<ConnectionType>,
    #[serde(default)]
    pub usable_as_tool: bool,
    pub properties: Vec<NodeProperty>,
}

impl NodeTypeDescription {
    /// Look up a declared parameter by name.
    pub fn property(&self, name: &str) -> Option<&NodeProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}
