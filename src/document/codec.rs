//! Conversion between config values and their editable text form
//!
//! Decoding only produces structured values from JSON-shaped text. Plain
//! text such as `false` or `20` stays a string, because the pipeline reads
//! most arguments as strings.

use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigToolError, ToolResult};

/// Render a value for a single-line text field
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Object(_) | Value::Array(_) => value.to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
    }
}

/// Parse an args cell back into a value.
///
/// JSON-looking text that fails to parse is kept verbatim.
pub fn parse_arg_value(raw: &str) -> Value {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return Value::String(String::new());
    }
    if looks_like_json(cleaned) {
        match decode_structured(cleaned) {
            Ok(value) => return value,
            Err(err) => debug!(error = %err, "Keeping args value as raw text"),
        }
    }
    Value::String(raw.to_string())
}

/// Text that starts like a JSON object or array
pub fn looks_like_json(text: &str) -> bool {
    text.starts_with('{') || text.starts_with('[')
}

/// Strict JSON parse used for JSON-shaped args cells
pub fn decode_structured(text: &str) -> ToolResult<Value> {
    serde_json::from_str(text).map_err(|err| ConfigToolError::Decode(err.to_string()))
}
