//! Model identifiers and what the assistant may assume about them.

pub mod capabilities;

pub use capabilities::ModelCapabilities;

/// Best-effort capabilities for a model served over the OpenAI-compatible API.
///
/// Unknown identifiers get conservative defaults, which makes structured
/// output fall back to prompt instructions instead of `json_schema`.
pub fn capabilities_for(model_id: &str) -> ModelCapabilities {
    let id = model_id.to_ascii_lowercase();
    if id.starts_with("gemini-") || id.starts_with("gpt-4o") || id.starts_with("gpt-4.1") {
        ModelCapabilities::full()
    } else if id.starts_with("gpt-") {
        ModelCapabilities {
            supports_tools: true,
            supports_json_mode: true,
            ..ModelCapabilities::default()
        }
    } else {
        ModelCapabilities::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemini_models_support_structured_output() {
        let caps = capabilities_for("gemini-2.0-flash");
        assert!(caps.supports_tools);
        assert!(caps.supports_json_schema);
    }

    #[test]
    fn unknown_models_get_conservative_defaults() {
        let caps = capabilities_for("my-local-model");
        assert!(!caps.supports_tools);
        assert!(!caps.supports_json_schema);
        assert!(!caps.supports_json_mode);
    }

    #[test]
    fn matching_ignores_case() {
        assert!(capabilities_for("Gemini-2.5-Flash").supports_json_schema);
    }
}
