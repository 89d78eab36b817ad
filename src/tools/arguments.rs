//! Typed access to tool call arguments.

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::TripError;

/// Wrapper around tool call arguments providing typed extraction.
#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: Value,
}

impl ToolArguments {
    /// Wrap raw arguments. Some providers send the arguments as a JSON
    /// string; those are decoded here so handlers always see an object.
    pub fn new(value: Value) -> Self {
        let value = match value {
            Value::String(raw) if raw.trim().is_empty() => Value::Object(Default::default()),
            Value::String(raw) => serde_json::from_str(raw.trim()).unwrap_or(Value::String(raw)),
            other => other,
        };
        Self { value }
    }

    /// Get the raw JSON value.
    pub fn raw(&self) -> &Value {
        &self.value
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, TripError> {
        self.get_str_opt(key)
            .ok_or_else(|| TripError::InvalidArgument(format!("Missing string argument: {key}")))
    }

    /// Get an optional, non-blank string argument.
    pub fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.value
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Get an optional float argument.
    pub fn get_f64_opt(&self, key: &str) -> Option<f64> {
        self.value.get(key).and_then(Value::as_f64)
    }

    /// Get a `YYYY-MM-DD` date argument.
    pub fn get_date(&self, key: &str) -> Result<NaiveDate, TripError> {
        let raw = self.get_str(key)?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
            TripError::InvalidArgument(format!("Invalid date for {key} ('{raw}'): {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_arguments_are_decoded() {
        let args = ToolArguments::new(json!(r#"{"city":"Paris"}"#));
        assert_eq!(args.get_str("city").unwrap(), "Paris");
    }

    #[test]
    fn blank_string_arguments_become_empty_object() {
        let args = ToolArguments::new(json!("  "));
        assert!(args.raw().as_object().unwrap().is_empty());
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let args = ToolArguments::new(json!({"origin": "   "}));
        assert!(args.get_str_opt("origin").is_none());
        assert!(matches!(
            args.get_str("origin"),
            Err(TripError::InvalidArgument(_))
        ));
    }

    #[test]
    fn dates_are_parsed() {
        let args = ToolArguments::new(json!({"date": "2025-06-01", "bad": "06/01/2025"}));
        assert_eq!(
            args.get_date("date").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        assert!(args.get_date("bad").is_err());
    }

    #[test]
    fn numbers_are_optional() {
        let args = ToolArguments::new(json!({"budget": 120}));
        assert_eq!(args.get_f64_opt("budget"), Some(120.0));
        assert_eq!(args.get_f64_opt("missing"), None);
    }
}
