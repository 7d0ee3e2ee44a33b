use serde_json::Value;

use crate::error::ParseError;

/// Parse a specification document from JSON.
pub fn from_json(input: &str) -> Result<Value, ParseError> {
    let document: Value = serde_json::from_str(input)?;
    ensure_object(document)
}

/// Parse a specification document from YAML.
pub fn from_yaml(input: &str) -> Result<Value, ParseError> {
    let document: Value = serde_yaml_ng::from_str(input)?;
    ensure_object(document)
}

fn ensure_object(document: Value) -> Result<Value, ParseError> {
    if document.is_object() {
        Ok(document)
    } else {
        Err(ParseError::NotAnObject(kind_name(&document)))
    }
}

/// Short name of a JSON value's type, for diagnostics.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
