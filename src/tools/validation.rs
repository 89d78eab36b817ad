//! Check tool call arguments against the tool's schema before the handler runs.

use chrono::NaiveDate;
use serde_json::Value;

/// Validate arguments against a flat JSON object schema.
///
/// Covers what the travel tools declare: the object type, required fields,
/// property types, `format: "date"` strings and numeric `minimum`. Returns
/// the first violation found.
pub fn validate_arguments(args: &Value, schema: &Value) -> Result<(), String> {
    if schema.get("type").and_then(Value::as_str) == Some("object") && !args.is_object() {
        return Err(format!(
            "expected object arguments, got {}",
            json_type_name(args)
        ));
    }

    let Some(obj) = args.as_object() else {
        return Ok(());
    };

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if obj.get(name).map_or(true, Value::is_null) {
                return Err(format!("missing required field '{name}'"));
            }
        }
    }

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Ok(());
    };

    for (key, value) in obj {
        let Some(prop) = properties.get(key) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        if let Some(expected) = prop.get("type").and_then(Value::as_str) {
            if !value_matches_type(value, expected) {
                return Err(format!(
                    "field '{key}' expected type '{expected}', got {}",
                    json_type_name(value)
                ));
            }
        }
        if prop.get("format").and_then(Value::as_str) == Some("date") {
            let raw = value.as_str().unwrap_or_default();
            if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_err() {
                return Err(format!("field '{key}' must be a YYYY-MM-DD date, got '{raw}'"));
            }
        }
        if let (Some(min), Some(actual)) =
            (prop.get("minimum").and_then(Value::as_f64), value.as_f64())
        {
            if actual < min {
                return Err(format!("field '{key}' must be at least {min}, got {actual}"));
            }
        }
    }

    Ok(())
}

fn value_matches_type(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        _ => true,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
