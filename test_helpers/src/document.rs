//! Construct documents from JSON literals.

use anyhow::{Result, anyhow};
use serde_json::{Map, Value};

/// Converts a `json!` object literal into a document map.
///
/// # Errors
///
/// Returns an error when `value` is not a JSON object.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use yaml_overlay_test_helpers::document::doc;
///
/// let document = doc(json!({"a": {"b": 1}})).expect("object literal");
/// assert_eq!(document.get("a"), Some(&json!({"b": 1})));
/// ```
pub fn doc(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!("expected a JSON object, got {other}")),
    }
}
