//! Structured output: generate typed objects from model responses.

use serde::de::DeserializeOwned;

use crate::error::TripError;
use crate::provider::ModelProvider;
use crate::types::*;

/// Generate a typed object by asking the model to produce JSON.
///
/// Uses JSON Schema response format if the model supports it,
/// otherwise uses system prompt instructions.
pub async fn generate_object<T: DeserializeOwned>(
    provider: &dyn ModelProvider,
    mut messages: Vec<ModelMessage>,
    mut settings: GenerationSettings,
    schema: serde_json::Value,
    type_name: &str,
) -> Result<GenerateObjectResult<T>, TripError> {
    let capabilities = provider.capabilities();

    if capabilities.supports_json_schema {
        settings.response_format = Some(ResponseFormat::JsonSchema {
            schema,
            name: type_name.to_string(),
        });
    } else {
        let preamble = if capabilities.supports_json_mode {
            settings.response_format = Some(ResponseFormat::JsonObject);
            "You must respond with valid JSON matching this schema:"
        } else {
            "You must respond with ONLY valid JSON (no markdown, no explanation) matching this schema:"
        };
        let schema_instruction = format!(
            "{preamble}\n```json\n{}\n```",
            serde_json::to_string_pretty(&schema)?
        );
        messages.insert(0, ModelMessage::system(schema_instruction));
    }

    let result = super::text::generate_text(provider, messages, settings, None).await?;

    let object: T = serde_json::from_str(strip_code_fences(&result.text))?;

    Ok(GenerateObjectResult {
        object,
        usage: result.usage,
    })
}

/// Strip markdown code fences from a JSON response.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_code_fences_plain_json() {
        assert_eq!(strip_code_fences(r#"{"key": "value"}"#), r#"{"key": "value"}"#);
    }

    #[test]
    fn strip_code_fences_with_json_fence() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), r#"{"key": "value"}"#);
    }

    #[test]
    fn strip_code_fences_unterminated() {
        assert_eq!(strip_code_fences("```\n{\"a\": 1}"), r#"{"a": 1}"#);
    }
}
