//! Byte coercion and base64 encoding.
//!
//! Byte values follow buffer-construction semantics: numbers are truncated
//! toward zero and then reduced to their low 8 bits, so `256` becomes `0`
//! and `-1` becomes `255`. Non-finite numbers become `0`. Numeric strings
//! are read as numbers; booleans, nulls, objects, arrays and non-numeric
//! strings are rejected.

use base64::{engine::general_purpose, Engine as _};
use serde_json::Value;

use plugin::NodeError;

/// Name of the byte-array parameter, used in error messages.
pub const DATA_BUFFER: &str = "dataBuffer";

/// Encode `bytes` with the standard alphabet and `=` padding.
pub fn encode(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Build the byte sequence described by a resolved `dataBuffer` value.
///
/// Accepts a JSON array, `null`, an empty string, or a string holding a
/// JSON array.
///
/// # Errors
/// [`NodeError::InvalidParameter`] for any other shape, or when an element
/// cannot be read as a number.
pub fn bytes_from_parameter(value: &Value) -> Result<Vec<u8>, NodeError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(elements) => elements
            .iter()
            .enumerate()
            .map(|(position, element)| byte_from_element(position, element))
            .collect(),
        Value::String(text) if text.trim().is_empty() => Ok(Vec::new()),
        Value::String(text) => {
            let parsed: Value = serde_json::from_str(text).map_err(|e| {
                NodeError::invalid_parameter(DATA_BUFFER, format!("not valid JSON: {e}"))
            })?;
            match parsed {
                Value::Array(_) | Value::Null => bytes_from_parameter(&parsed),
                other => Err(NodeError::invalid_parameter(
                    DATA_BUFFER,
                    format!("expected an array of byte values, got {}", kind(&other)),
                )),
            }
        }
        other => Err(NodeError::invalid_parameter(
            DATA_BUFFER,
            format!("expected an array of byte values, got {}", kind(other)),
        )),
    }
}

fn byte_from_element(position: usize, element: &Value) -> Result<u8, NodeError> {
    let invalid = || {
        NodeError::invalid_parameter(
            DATA_BUFFER,
            format!("element {position} is not a number: {element}"),
        )
    };

    match element {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i as u8)
            } else if let Some(u) = n.as_u64() {
                Ok(u as u8)
            } else {
                Ok(n.as_f64().map(truncate_to_byte).unwrap_or(0))
            }
        }
        Value::String(s) => s.trim().parse::<f64>().map(truncate_to_byte).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn truncate_to_byte(x: f64) -> u8 {
    if !x.is_finite() {
        return 0;
    }
    x.trunc().rem_euclid(256.0) as u8
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
