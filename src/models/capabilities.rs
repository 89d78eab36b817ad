//! What the assistant may assume about a hosted model.

use serde::{Deserialize, Serialize};

/// Features the travel agent and the guardrail classifiers rely on.
///
/// Classifiers need structured JSON to produce a verdict; the main agent
/// needs function calling to reach the flight and hotel searches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModelCapabilities {
    /// Accepts the `tools` list and answers with `tool_calls`.
    pub supports_tools: bool,
    /// Honors `response_format: json_object`.
    pub supports_json_mode: bool,
    /// Honors `response_format: json_schema`, so verdicts come back in shape.
    pub supports_json_schema: bool,
}

impl ModelCapabilities {
    /// A model that can serve both the agent and the classifiers.
    pub fn full() -> Self {
        Self {
            supports_tools: true,
            supports_json_mode: true,
            supports_json_schema: true,
        }
    }
}
