//! Deep merge of user-supplied JSON overrides into the live document

use serde_json::Value;

use super::ConfigMap;
use crate::error::{ConfigToolError, ToolResult};

/// Merge `overrides` into `base` in place.
///
/// Objects merge recursively; on any other combination the override wins,
/// including replacing an object with a scalar and vice versa.
pub fn merge_dict(base: &mut ConfigMap, overrides: ConfigMap) -> &mut ConfigMap {
    for (key, value) in overrides {
        let Value::Object(nested) = value else {
            base.insert(key, value);
            continue;
        };
        if let Some(Value::Object(existing)) = base.get_mut(&key) {
            merge_dict(existing, nested);
            continue;
        }
        base.insert(key, Value::Object(nested));
    }
    base
}

/// Validate that an override payload is an object before merging it
pub fn apply_overrides(base: &mut ConfigMap, overrides: Value) -> ToolResult<()> {
    match overrides {
        Value::Object(map) => {
            merge_dict(base, map);
            Ok(())
        }
        other => Err(ConfigToolError::Validation(format!(
            "overrides must be a JSON object, got {}",
            kind_name(&other)
        ))),
    }
}

/// Parse override text, then validate and merge it
pub fn apply_override_text(base: &mut ConfigMap, text: &str) -> ToolResult<()> {
    let overrides: Value = serde_json::from_str(text)?;
    apply_overrides(base, overrides)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
